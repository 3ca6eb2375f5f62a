//! Dispatch of invocations to the contract ports.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::arguments::Arguments;
use super::{ChaincodePorts, ContractNames, Invocation};
use crate::domain::ports::{
    CallerIdentity, NewUserRequest, PropertyPurchaseRequest, PropertyRegistrationRequest,
    PropertyUpdateRequest, RechargeRequest, Role,
};
use crate::domain::{ContractError, LedgerRecord};

const INSTANTIATE: &str = "instantiate";

/// Routes invocations to the participant and registrar contracts.
///
/// Every invocation must carry a participant identity; registrar functions
/// additionally require the registrar role. Both checks run before any
/// argument is parsed or any ledger key is read.
#[derive(Clone)]
pub struct ChaincodeRouter {
    ports: ChaincodePorts,
    names: ContractNames,
}

impl ChaincodeRouter {
    /// Create a router over `ports` answering to `names`.
    pub fn new(ports: ChaincodePorts, names: ContractNames) -> Self {
        Self { ports, names }
    }

    /// Contract names this router answers to.
    pub fn names(&self) -> &ContractNames {
        &self.names
    }

    /// Run one invocation and return its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the caller is not permitted, the
    /// contract or function is unknown, an argument is malformed, or the
    /// contract rejects the call.
    pub async fn invoke(&self, invocation: Invocation) -> Result<Value, ContractError> {
        let Invocation {
            contract,
            function,
            args,
            caller,
        } = invocation;
        let caller = self.authenticate(caller)?;
        debug!(%contract, %function, caller = %caller, "invocation received");

        if contract == self.names.user() {
            self.dispatch_user(&function, &args).await
        } else if contract == self.names.registrar() {
            self.require_registrar(&caller)?;
            self.dispatch_registrar(&function, &args).await
        } else {
            Err(ContractError::unknown_contract(contract))
        }
    }

    fn authenticate(
        &self,
        caller: Option<CallerIdentity>,
    ) -> Result<CallerIdentity, ContractError> {
        match caller {
            Some(caller) if self.ports.access_control.has_role(&caller, Role::Participant) => {
                Ok(caller)
            }
            _ => Err(ContractError::Unauthenticated),
        }
    }

    fn require_registrar(&self, caller: &CallerIdentity) -> Result<(), ContractError> {
        if self.ports.access_control.has_role(caller, Role::Registrar) {
            Ok(())
        } else {
            warn!(caller = %caller, "registrar role required");
            Err(ContractError::registrar_role_required(caller.msp_id.as_str()))
        }
    }

    async fn dispatch_user(&self, function: &str, args: &[String]) -> Result<Value, ContractError> {
        let contract = &self.ports.user_contract;
        match function {
            INSTANTIATE => {
                Arguments::expect(function, &[], args)?;
                Ok(instantiated(self.names.user()))
            }
            "requestNewUser" => {
                let args = Arguments::expect(
                    function,
                    &["userId", "name", "email", "phone", "nationalId"],
                    args,
                )?;
                let request = NewUserRequest {
                    user_id: args.field(0)?,
                    name: args.field(1)?,
                    email: args.field(2)?,
                    phone: args.field(3)?,
                    national_id: args.field(4)?,
                };
                to_json(&contract.request_new_user(request).await?)
            }
            "rechargeAccount" => {
                let args = Arguments::expect(
                    function,
                    &["userId", "name", "nationalId", "transactionCode"],
                    args,
                )?;
                let request = RechargeRequest {
                    user_id: args.field(0)?,
                    name: args.field(1)?,
                    national_id: args.field(2)?,
                    transaction_code: args.text(3).to_owned(),
                };
                to_json(&contract.recharge_account(request).await?)
            }
            "propertyRegistrationRequest" => {
                let args = Arguments::expect(
                    function,
                    &["propertyId", "ownerName", "nationalId", "price", "status"],
                    args,
                )?;
                let request = PropertyRegistrationRequest {
                    property_id: args.field(0)?,
                    owner_name: args.field(1)?,
                    national_id: args.field(2)?,
                    price: args.amount(3)?,
                    status: args.text(4).to_owned(),
                };
                to_json(&contract.property_registration_request(request).await?)
            }
            "updateProperty" => {
                let args = Arguments::expect(
                    function,
                    &["propertyId", "ownerName", "nationalId", "status"],
                    args,
                )?;
                let request = PropertyUpdateRequest {
                    property_id: args.field(0)?,
                    owner_name: args.field(1)?,
                    national_id: args.field(2)?,
                    status: args.text(3).to_owned(),
                };
                to_json(&contract.update_property(request).await?)
            }
            "purchaseProperty" => {
                let args = Arguments::expect(
                    function,
                    &["propertyId", "buyerName", "buyerNationalId"],
                    args,
                )?;
                let request = PropertyPurchaseRequest {
                    property_id: args.field(0)?,
                    buyer_name: args.field(1)?,
                    buyer_national_id: args.field(2)?,
                };
                to_json(&contract.purchase_property(request).await?)
            }
            "getUser" => {
                let args = Arguments::expect(function, &["userId"], args)?;
                to_json(&contract.get_user(&args.field(0)?).await?)
            }
            "viewProperty" => {
                let args = Arguments::expect(function, &["propertyId"], args)?;
                to_json(&contract.view_property(&args.field(0)?).await?)
            }
            other => Err(ContractError::unknown_function(self.names.user(), other)),
        }
    }

    async fn dispatch_registrar(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<Value, ContractError> {
        let contract = &self.ports.registrar_contract;
        match function {
            INSTANTIATE => {
                Arguments::expect(function, &[], args)?;
                Ok(instantiated(self.names.registrar()))
            }
            "approveNewUser" => {
                let args = Arguments::expect(function, &["userId"], args)?;
                to_json(&contract.approve_new_user(&args.field(0)?).await?)
            }
            "approvePropertyRegistration" => {
                let args = Arguments::expect(function, &["propertyId"], args)?;
                to_json(&contract.approve_property_registration(&args.field(0)?).await?)
            }
            "viewUser" => {
                let args = Arguments::expect(function, &["userId"], args)?;
                to_json(&contract.view_user(&args.field(0)?).await?)
            }
            "viewProperty" => {
                let args = Arguments::expect(function, &["propertyId"], args)?;
                to_json(&contract.view_property(&args.field(0)?).await?)
            }
            other => Err(ContractError::unknown_function(self.names.registrar(), other)),
        }
    }
}

fn instantiated(contract: &str) -> Value {
    info!(%contract, "contract instantiated");
    Value::Null
}

fn to_json<R: LedgerRecord>(record: &R) -> Result<Value, ContractError> {
    serde_json::to_value(record).map_err(|err| ContractError::encode_error(R::KIND, err))
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
