//! Ordinal survey codes and their labels.
//!
//! Both scales are 1-5 in the source data. Conversion is total over `u8`:
//! anything outside the scale comes back as [`HrError::UnmappedCode`] so the
//! caller decides whether to flag or drop it.

use serde::{Deserialize, Serialize};

use crate::error::HrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    NoFormalQualifications,
    HighSchool,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationLevel {
    pub fn code(self) -> u8 {
        match self {
            EducationLevel::NoFormalQualifications => 1,
            EducationLevel::HighSchool => 2,
            EducationLevel::Bachelors => 3,
            EducationLevel::Masters => 4,
            EducationLevel::Doctorate => 5,
        }
    }
}

impl TryFrom<u8> for EducationLevel {
    type Error = HrError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(EducationLevel::NoFormalQualifications),
            2 => Ok(EducationLevel::HighSchool),
            3 => Ok(EducationLevel::Bachelors),
            4 => Ok(EducationLevel::Masters),
            5 => Ok(EducationLevel::Doctorate),
            code => Err(HrError::UnmappedCode {
                dimension: "education",
                code,
            }),
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationLevel::NoFormalQualifications => write!(f, "No Formal Qualifications"),
            EducationLevel::HighSchool => write!(f, "High School"),
            EducationLevel::Bachelors => write!(f, "Bachelor's"),
            EducationLevel::Masters => write!(f, "Master's"),
            EducationLevel::Doctorate => write!(f, "Doctorate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobSatisfaction {
    VeryDissatisfied,
    Dissatisfied,
    Neutral,
    Satisfied,
    VerySatisfied,
}

impl JobSatisfaction {
    pub fn code(self) -> u8 {
        match self {
            JobSatisfaction::VeryDissatisfied => 1,
            JobSatisfaction::Dissatisfied => 2,
            JobSatisfaction::Neutral => 3,
            JobSatisfaction::Satisfied => 4,
            JobSatisfaction::VerySatisfied => 5,
        }
    }
}

impl TryFrom<u8> for JobSatisfaction {
    type Error = HrError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(JobSatisfaction::VeryDissatisfied),
            2 => Ok(JobSatisfaction::Dissatisfied),
            3 => Ok(JobSatisfaction::Neutral),
            4 => Ok(JobSatisfaction::Satisfied),
            5 => Ok(JobSatisfaction::VerySatisfied),
            code => Err(HrError::UnmappedCode {
                dimension: "job satisfaction",
                code,
            }),
        }
    }
}

impl std::fmt::Display for JobSatisfaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobSatisfaction::VeryDissatisfied => write!(f, "Very Dissatisfied"),
            JobSatisfaction::Dissatisfied => write!(f, "Dissatisfied"),
            JobSatisfaction::Neutral => write!(f, "Neutral"),
            JobSatisfaction::Satisfied => write!(f, "Satisfied"),
            JobSatisfaction::VerySatisfied => write!(f, "Very Satisfied"),
        }
    }
}
