//! Custom error types for the reboot orchestrator
//!
//! Collaborator seams (control plane, notification channel, escalation dispatch)
//! return these typed errors. Stage services never let them cross their boundary:
//! every error is converted into a structured stage result at the point of call.

use std::fmt;

/// Main error type for the orchestrator
#[derive(Debug)]
pub enum OrchestratorError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Compute or storage control-plane errors
    ControlPlane(ControlPlaneError),

    /// Notification channel errors
    Notification(NotificationError),

    /// Escalation hand-off errors
    Dispatch(DispatchError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },
}

/// Control-plane error variants
#[derive(Debug)]
pub enum ControlPlaneError {
    /// Request could not be sent or no response arrived
    RequestFailed { operation: String, reason: String },

    /// Control plane answered with a non-success status
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    /// Response body could not be understood
    InvalidResponse { operation: String, reason: String },

    /// Identifier cannot be used as a route segment
    InvalidIdentifier { field: String, value: String },
}

/// Notification channel error variants
#[derive(Debug)]
pub enum NotificationError {
    /// Delivery to one recipient failed
    DeliveryFailed { recipient: String, reason: String },

    /// Delivery to one recipient timed out
    Timeout { recipient: String },
}

/// Escalation dispatch error variants
#[derive(Debug)]
pub enum DispatchError {
    /// Handler endpoint could not be reached
    Unreachable { target: String, reason: String },

    /// Handler endpoint refused the failure record
    Rejected { target: String, status: u16 },
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestratorError::Config(e) => write!(f, "Configuration error: {}", e),
            OrchestratorError::ControlPlane(e) => write!(f, "Control plane error: {}", e),
            OrchestratorError::Notification(e) => write!(f, "Notification error: {}", e),
            OrchestratorError::Dispatch(e) => write!(f, "Escalation dispatch error: {}", e),
            OrchestratorError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl fmt::Display for ControlPlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlPlaneError::RequestFailed { operation, reason } => {
                write!(f, "{} request failed: {}", operation, reason)
            }
            ControlPlaneError::UnexpectedStatus {
                operation,
                status,
                body,
            } => {
                write!(f, "{} returned status {}: {}", operation, status, body)
            }
            ControlPlaneError::InvalidResponse { operation, reason } => {
                write!(f, "Invalid {} response: {}", operation, reason)
            }
            ControlPlaneError::InvalidIdentifier { field, value } => {
                write!(f, "Invalid {} '{}'", field, value)
            }
        }
    }
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationError::DeliveryFailed { recipient, reason } => {
                write!(f, "Delivery to {} failed: {}", recipient, reason)
            }
            NotificationError::Timeout { recipient } => {
                write!(f, "Delivery to {} timed out", recipient)
            }
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Unreachable { target, reason } => {
                write!(f, "Escalation handler {} unreachable: {}", target, reason)
            }
            DispatchError::Rejected { target, status } => {
                write!(
                    f,
                    "Escalation handler {} rejected failure record with status {}",
                    target, status
                )
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ControlPlaneError {}
impl std::error::Error for NotificationError {}
impl std::error::Error for DispatchError {}

impl From<anyhow::Error> for OrchestratorError {
    fn from(err: anyhow::Error) -> Self {
        OrchestratorError::Other(err.to_string())
    }
}

impl From<ConfigError> for OrchestratorError {
    fn from(err: ConfigError) -> Self {
        OrchestratorError::Config(err)
    }
}

impl From<ControlPlaneError> for OrchestratorError {
    fn from(err: ControlPlaneError) -> Self {
        OrchestratorError::ControlPlane(err)
    }
}

impl From<NotificationError> for OrchestratorError {
    fn from(err: NotificationError) -> Self {
        OrchestratorError::Notification(err)
    }
}

impl From<DispatchError> for OrchestratorError {
    fn from(err: DispatchError) -> Self {
        OrchestratorError::Dispatch(err)
    }
}
