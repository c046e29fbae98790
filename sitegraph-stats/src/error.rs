use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Missing statistic '{stat}' on {domain}")]
    MissingStat { domain: String, stat: &'static str },

    #[error("Division by zero: '{stat}' is zero on {domain}")]
    DivisionByZero { domain: String, stat: &'static str },
}

pub type Result<T> = std::result::Result<T, StatsError>;
