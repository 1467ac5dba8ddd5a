//! Unified error codes for the Essenza storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Cart and checkout errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Cart / Checkout ====================
    /// Cart is empty
    CartEmpty = 4001,
    /// Bundle has unfilled slots
    BundleIncomplete = 4002,
    /// No free slot remains in the bundle
    NoFreeSlot = 4003,
    /// A submission is already in flight
    SubmissionInProgress = 4004,
    /// Checkout already completed for this cart
    CheckoutCompleted = 4005,
    /// Unknown shipping method
    UnknownShippingMethod = 4006,

    // ==================== 6xxx: Catalog ====================
    /// Catalog item variant not found
    VariantNotFound = 6001,
    /// Bundle configuration not found
    BundleNotFound = 6002,
    /// Bundle configuration does not allow customization
    BundleNotCustomizable = 6003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Local storage error
    StorageError = 9002,
    /// Catalog lookup transport failure
    NetworkError = 9003,
    /// Serialization error
    SerializationError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::CartEmpty => "Cart is empty",
            Self::BundleIncomplete => "Bundle has unfilled slots",
            Self::NoFreeSlot => "No free slot remains",
            Self::SubmissionInProgress => "A submission is already in progress",
            Self::CheckoutCompleted => "Checkout already completed",
            Self::UnknownShippingMethod => "Unknown shipping method",

            Self::VariantNotFound => "Variant not found",
            Self::BundleNotFound => "Bundle configuration not found",
            Self::BundleNotCustomizable => "Bundle is not customizable",

            Self::InternalError => "Internal error",
            Self::StorageError => "Local storage error",
            Self::NetworkError => "Catalog lookup failed",
            Self::SerializationError => "Serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            4001 => Self::CartEmpty,
            4002 => Self::BundleIncomplete,
            4003 => Self::NoFreeSlot,
            4004 => Self::SubmissionInProgress,
            4005 => Self::CheckoutCompleted,
            4006 => Self::UnknownShippingMethod,

            6001 => Self::VariantNotFound,
            6002 => Self::BundleNotFound,
            6003 => Self::BundleNotCustomizable,

            9001 => Self::InternalError,
            9002 => Self::StorageError,
            9003 => Self::NetworkError,
            9004 => Self::SerializationError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
