use thiserror::Error;

/// Raised while registering block-types. Nothing is partially registered when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("block `{block}` declares property `{property}` more than once")]
    DuplicateProperty {
        block: &'static str,
        property: &'static str,
    },
    #[error("property `{property}` of block `{block}` has no values")]
    EmptyDomain {
        block: &'static str,
        property: &'static str,
    },
    #[error("property `{property}` of block `{block}` has {size} values, at most 256 are supported")]
    DomainTooLarge {
        block: &'static str,
        property: &'static str,
        size: usize,
    },
    #[error("default for `{property}` of block `{block}` is outside its domain")]
    InvalidDefault {
        block: &'static str,
        property: &'static str,
    },
    #[error("block `{block}` has a default for undeclared property `{property}`")]
    UndeclaredDefault {
        block: &'static str,
        property: &'static str,
    },
    #[error("block `{0}` is registered more than once")]
    DuplicateBlock(&'static str),
    #[error("block `{block}` needs {states} states, the state id space is exhausted")]
    TooManyStates { block: &'static str, states: u128 },
    #[error("more than {0} block-types registered")]
    TooManyBlocks(usize),
}

/// Misuse of the state API by calling code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("block `{block}` does not declare property `{property}`")]
    UndeclaredProperty {
        block: &'static str,
        property: &'static str,
    },
    #[error("property `{property}` of block `{block}` has a different domain than the handle used")]
    DomainMismatch {
        block: &'static str,
        property: &'static str,
    },
    #[error("value {value} is outside the domain of `{property}`")]
    ValueOutOfDomain {
        property: &'static str,
        value: String,
    },
    #[error("property `{property}` was resolved for block `{resolved}`, not `{block}`")]
    ForeignSlot {
        block: &'static str,
        resolved: &'static str,
        property: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateParseError {
    #[error("malformed state string `{0}`")]
    Malformed(String),
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
    #[error("block `{block}` has no property `{property}`")]
    UnknownProperty { block: &'static str, property: String },
    #[error("`{value}` is not a valid value for `{property}`")]
    InvalidValue { property: &'static str, value: String },
    #[error("property `{0}` is given more than once")]
    RepeatedProperty(String),
}
