//! Builders wiring the contract services onto a ledger store.

use std::sync::Arc;

use mockable::Clock;

use crate::config::ChaincodeConfig;
use crate::domain::ports::LedgerStore;
use crate::domain::{RegistrarContractService, UserContractService};
use crate::inbound::{ChaincodePorts, ChaincodeRouter, ContractNames};
use crate::outbound::MspAccessControl;

/// Build both contract services over `store`, plus MSP role checks.
pub fn build_ports<S>(
    store: Arc<S>,
    config: &ChaincodeConfig,
    clock: Arc<dyn Clock>,
) -> ChaincodePorts
where
    S: LedgerStore + ?Sized + 'static,
{
    let namespaces = Arc::new(config.namespaces.clone());
    let user_contract = UserContractService::new(
        Arc::clone(&store),
        Arc::clone(&namespaces),
        config.policy,
        clock,
    );
    let registrar_contract = RegistrarContractService::new(store, namespaces, config.policy);
    ChaincodePorts {
        user_contract: Arc::new(user_contract),
        registrar_contract: Arc::new(registrar_contract),
        access_control: Arc::new(MspAccessControl::new(config.registrar_msps.iter().cloned())),
    }
}

/// Build a router answering to the configured organisation's contract names.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use regnet::outbound::InMemoryLedgerStore;
/// use regnet::{ChaincodeConfig, build_router};
///
/// let router = build_router(
///     Arc::new(InMemoryLedgerStore::new()),
///     &ChaincodeConfig::default(),
///     Arc::new(mockable::DefaultClock),
/// );
/// assert_eq!(
///     router.names().user(),
///     "org.property-registration-network.regnet.user-contract"
/// );
/// ```
pub fn build_router<S>(
    store: Arc<S>,
    config: &ChaincodeConfig,
    clock: Arc<dyn Clock>,
) -> ChaincodeRouter
where
    S: LedgerStore + ?Sized + 'static,
{
    ChaincodeRouter::new(
        build_ports(store, config, clock),
        ContractNames::for_org(config.namespaces.org()),
    )
}
