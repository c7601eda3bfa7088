pub mod policy;
pub mod result;
pub mod salary;

pub use policy::{CityYear, PolicyRecord};
pub use result::{ContributionResult, ResultFilter, ResultSummary, StoredResult};
pub use salary::{SalaryRecord, YearlyAverage};
