//! Error macros for gradeshape

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::GradeError::invalid_value($context, $value))
    };
}

/// Macro for rejecting a structure that breaks a tree invariant
#[macro_export]
macro_rules! bail_structure {
    ($($arg:tt)*) => {
        return Err($crate::error::GradeError::invalid_structure(format!($($arg)*)))
    };
}
