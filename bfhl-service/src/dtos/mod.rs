pub mod bfhl;

pub use bfhl::{BfhlRequest, ExactInteger, Operation, OperationOutput, RequestError};
