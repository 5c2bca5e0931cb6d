pub mod area;
pub mod assessment;
pub mod child;
pub mod response;

pub use area::DevelopmentalArea;
pub use assessment::{Assessment, AssessmentStatus};
pub use child::{Child, ChildProfile, Gender};
pub use response::{ResponseItem, Responses, ScoreValue};
