use std::sync::OnceLock;

use tracing::{debug, warn};

use super::{InstanceRegistry, RegistryBuilder};

static GLOBAL: OnceLock<InstanceRegistry> = OnceLock::new();

/// The process-wide registry.
///
/// The first call seals it: unless [`install_global`] ran earlier, it holds
/// the built-in records from [`RegistryBuilder::with_defaults`].
pub fn global() -> &'static InstanceRegistry {
    GLOBAL.get_or_init(|| {
        debug!("sealing default global instance registry");
        RegistryBuilder::with_defaults().build()
    })
}

/// Makes `registry` the process-wide registry.
///
/// # Errors
///
/// Gives `registry` back if the global registry is already sealed, either by
/// an earlier install or by a call to [`global`].
pub fn install_global(registry: InstanceRegistry) -> Result<(), InstanceRegistry> {
    GLOBAL
        .set(registry)
        .inspect(|_| debug!("installed global instance registry"))
        .inspect_err(|_| warn!("global instance registry is already sealed; install ignored"))
}
