//! Positional argument parsing.

use crate::domain::{ContractError, FieldValidationError};

/// Arguments of one function call, checked for arity.
pub(super) struct Arguments<'a> {
    names: &'static [&'static str],
    values: &'a [String],
}

impl<'a> Arguments<'a> {
    /// Check that `values` holds exactly one value per name.
    pub(super) fn expect(
        function: &str,
        names: &'static [&'static str],
        values: &'a [String],
    ) -> Result<Self, ContractError> {
        if values.len() != names.len() {
            return Err(ContractError::invalid_argument(
                "args",
                format!(
                    "{function} expects {} argument(s) ({}), got {}",
                    names.len(),
                    names.join(", "),
                    values.len()
                ),
            ));
        }
        Ok(Self { names, values })
    }

    fn name(&self, index: usize) -> &'static str {
        self.names.get(index).copied().unwrap_or("arg")
    }

    /// Raw text at `index`.
    pub(super) fn text(&self, index: usize) -> &'a str {
        self.values.get(index).map_or("", String::as_str)
    }

    /// Validated field at `index`.
    pub(super) fn field<T>(&self, index: usize) -> Result<T, ContractError>
    where
        T: TryFrom<String, Error = FieldValidationError>,
    {
        T::try_from(self.text(index).to_owned())
            .map_err(|err| ContractError::invalid_argument(self.name(index), err.to_string()))
    }

    /// Unsigned integer at `index`.
    pub(super) fn amount(&self, index: usize) -> Result<u64, ContractError> {
        self.text(index).trim().parse().map_err(|err| {
            ContractError::invalid_argument(
                self.name(index),
                format!("expected a non-negative integer: {err}"),
            )
        })
    }
}
