use tracing::trace;

/// Installs the ring provider used by the kube TLS stack. Safe to call more than once.
pub fn init_crypto() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        trace!("rustls crypto provider already installed");
    }
}
