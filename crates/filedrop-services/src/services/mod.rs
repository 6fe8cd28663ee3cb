#[cfg(any(feature = "dynamodb", feature = "lambda"))]
pub mod aws;
#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod traits;
