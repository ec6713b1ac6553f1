/// Application-level error carried up to `main`.
///
/// Exit codes: `2` for configuration and I/O problems, `4` for numerical failures.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<NumericError> for AppError {
    fn from(err: NumericError) -> Self {
        AppError::new(4, err.to_string())
    }
}

/// Failures reported by the quadrature and root-finding kernels.
///
/// Non-positive masses are not errors: the density is defined as zero there.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    /// Adaptive quadrature ran out of subdivisions before meeting its tolerance.
    Integration {
        lower: f64,
        upper: f64,
        estimate: f64,
        abs_error: f64,
        segments: usize,
    },
    /// An integrand or objective returned NaN/Inf.
    NonFinite { at: f64 },
    /// The root bracket does not contain a sign change.
    Bracket {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },
    /// The root solver exceeded its iteration budget.
    NoConvergence { iterations: usize, estimate: f64 },
    InvalidInput(String),
}

impl std::fmt::Display for NumericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericError::Integration {
                lower,
                upper,
                estimate,
                abs_error,
                segments,
            } => write!(
                f,
                "Integration over [{lower}, {upper}] did not converge after {segments} segments \
                 (estimate={estimate:.6e}, abs_error={abs_error:.3e})."
            ),
            NumericError::NonFinite { at } => {
                write!(f, "Non-finite function value at x={at}.")
            }
            NumericError::Bracket {
                lower,
                upper,
                f_lower,
                f_upper,
            } => write!(
                f,
                "No sign change in bracket [{lower}, {upper}] (f(lower)={f_lower:.6e}, f(upper)={f_upper:.6e})."
            ),
            NumericError::NoConvergence {
                iterations,
                estimate,
            } => write!(
                f,
                "Root solver did not converge after {iterations} iterations (last estimate={estimate})."
            ),
            NumericError::InvalidInput(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for NumericError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_errors_map_to_exit_code_four() {
        let err: AppError = NumericError::Bracket {
            lower: 1e-4,
            upper: 0.5,
            f_lower: 0.1,
            f_upper: 0.2,
        }
        .into();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("No sign change"));
    }
}
