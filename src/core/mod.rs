pub mod emit;
pub mod generator;
pub mod indicators;

pub use crate::domain::model::{
    Design, DesignScheme, ExplanatoryVariableSet, IndicatorVector, SubjectList,
};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
