use crate::core::emit::{render_contrasts, render_ftests, render_matrix};
use crate::core::indicators::IndicatorSet;
use crate::core::{ConfigProvider, Design, DesignScheme, ExplanatoryVariableSet, Storage, SubjectList};
use crate::utils::error::{DesignError, Result};
use crate::utils::validation::validate_file_stem;
use serde::Serialize;
use std::path::Path;

/// Genotype contrast, ignoring condition.
pub const GENOTYPE_DESIGN: &str = "LLSS";
/// Condition contrast, ignoring genotype.
pub const CONDITION_DESIGN: &str = "CANoCA";
/// Full 2x2 ANOVA over the four interaction cells.
pub const ANOVA_DESIGN: &str = "Anova_AlleleCA";

const TABLE_HEADER: [&str; 9] = [
    "subject", "LL", "SS", "CA", "NoCA", "LLCA", "LLNoCA", "SSCA", "SSNoCA",
];

#[derive(Debug, Clone, Serialize)]
pub struct DesignSummary {
    pub label: String,
    pub evs: Vec<String>,
    #[serde(flatten)]
    pub scheme: DesignScheme,
    pub files: Vec<String>,
}

impl DesignSummary {
    fn from_design(design: &Design, files: Vec<String>) -> Self {
        Self {
            label: design.label().to_string(),
            evs: design.evs().names().into_iter().map(str::to_string).collect(),
            scheme: design.scheme(),
            files,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub subjects: usize,
    pub output_dir: String,
    pub designs: Vec<DesignSummary>,
    pub indicator_table: Option<String>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.designs
            .iter()
            .flat_map(|d| d.files.iter().map(String::as_str))
    }
}

/// The three fixed group-analysis designs built from one indicator set.
pub fn build_designs(indicators: &IndicatorSet) -> Result<Vec<Design>> {
    let genotype = ExplanatoryVariableSet::new(vec![indicators.ll.clone(), indicators.ss.clone()])?;
    let condition =
        ExplanatoryVariableSet::new(vec![indicators.ca.clone(), indicators.no_ca.clone()])?;
    let anova = ExplanatoryVariableSet::new(vec![
        indicators.ll_ca.clone(),
        indicators.ll_no_ca.clone(),
        indicators.ss_ca.clone(),
        indicators.ss_no_ca.clone(),
    ])?;

    Ok(vec![
        Design::new(GENOTYPE_DESIGN, genotype),
        Design::new(CONDITION_DESIGN, condition),
        Design::new(ANOVA_DESIGN, anova),
    ])
}

/// CSV audit table of every derived indicator, one row per subject.
pub fn render_indicator_table(subjects: &SubjectList, indicators: &IndicatorSet) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TABLE_HEADER)?;

    let columns = indicators.all();
    for (i, subject) in subjects.iter().enumerate() {
        let mut record = Vec::with_capacity(TABLE_HEADER.len());
        record.push(subject.to_string());
        record.extend(columns.iter().map(|ev| ev.values()[i].to_string()));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| DesignError::IoError(e.into_error()))
}

pub struct DesignGenerator<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DesignGenerator<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_path(&self, file_name: &str) -> String {
        Path::new(self.config.output_dir())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    pub fn load_subjects(&self) -> Result<SubjectList> {
        let path = self.config.subjects_file();
        tracing::debug!("Reading subject list from: {}", path);

        let data = self.storage.read_file(path)?;
        let text = String::from_utf8(data).map_err(|e| DesignError::ReadError {
            path: self.storage.resolve_path(path),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let subjects = SubjectList::parse(&text);
        tracing::info!("Loaded {} subjects from {}", subjects.len(), path);
        Ok(subjects)
    }

    fn derive(&self, subjects: &SubjectList) -> Result<IndicatorSet> {
        let indicators = IndicatorSet::derive(subjects, &self.config.markers())?;

        let ambiguous = indicators.ambiguous_subjects(subjects);
        if !ambiguous.is_empty() {
            tracing::warn!(
                "Group membership is not exclusive for some subjects \
                 (both factors: {:?}, no factor: {:?}, both conditions: {:?}, no condition: {:?})",
                ambiguous.both_factors,
                ambiguous.no_factor,
                ambiguous.both_conditions,
                ambiguous.no_condition
            );
        }

        Ok(indicators)
    }

    /// Writes the matrix and, when the scheme has them, the contrast and
    /// F-test files. Returns the paths written, in order.
    pub fn create_files(&self, design: &Design) -> Result<Vec<String>> {
        validate_file_stem("design.label", design.label())?;

        let mut written = Vec::new();
        let scheme = design.scheme();

        let mat_path = self.output_path(&design.matrix_file());
        self.storage
            .write_file(&mat_path, render_matrix(design.evs()).as_bytes())?;
        written.push(mat_path);

        if let Some(contrasts) = render_contrasts(&scheme) {
            let con_path = self.output_path(&design.contrast_file());
            self.storage.write_file(&con_path, contrasts.as_bytes())?;
            written.push(con_path);
        }

        if let Some(ftests) = render_ftests(&scheme) {
            let fts_path = self.output_path(&design.ftest_file());
            self.storage.write_file(&fts_path, ftests.as_bytes())?;
            written.push(fts_path);
        }

        if let DesignScheme::Unsupported { ev_count } = scheme {
            tracing::warn!(
                "No contrast scheme for {} EVs, wrote matrix only for design {}",
                ev_count,
                design.label()
            );
        }

        tracing::debug!("Design {} written: {:?}", design.label(), written);
        Ok(written)
    }

    /// Everything `run` would do, without writing.
    pub fn plan(&self) -> Result<GenerationReport> {
        let subjects = self.load_subjects()?;
        let indicators = self.derive(&subjects)?;

        let designs = build_designs(&indicators)?
            .iter()
            .map(|design| {
                let files = design
                    .file_names()
                    .iter()
                    .map(|f| self.output_path(f))
                    .collect();
                DesignSummary::from_design(design, files)
            })
            .collect();

        Ok(GenerationReport {
            subjects: subjects.len(),
            output_dir: self.config.output_dir().to_string(),
            designs,
            indicator_table: self.config.indicator_table().map(str::to_string),
            dry_run: true,
        })
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let subjects = self.load_subjects()?;
        let indicators = self.derive(&subjects)?;

        let mut summaries = Vec::new();
        for design in build_designs(&indicators)? {
            tracing::info!(
                "Writing design {} ({} EVs x {} subjects)",
                design.label(),
                design.evs().num_waves(),
                design.evs().num_points()
            );
            let files = self.create_files(&design)?;
            summaries.push(DesignSummary::from_design(&design, files));
        }

        if let Some(table) = self.config.indicator_table() {
            let data = render_indicator_table(&subjects, &indicators)?;
            self.storage.write_file(table, &data)?;
            tracing::info!("Indicator table saved to: {}", table);
        }

        Ok(GenerationReport {
            subjects: subjects.len(),
            output_dir: self.config.output_dir().to_string(),
            designs: summaries,
            indicator_table: self.config.indicator_table().map(str::to_string),
            dry_run: false,
        })
    }
}
