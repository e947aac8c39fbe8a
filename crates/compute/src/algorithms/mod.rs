pub mod evaluation;
pub mod logistic;
pub mod preprocessing;

pub use evaluation::{ConfusionMatrix, ModelEvaluation};
pub use logistic::{LogisticParams, LogisticRegression};
pub use preprocessing::{train_test_split, StandardScaler};
