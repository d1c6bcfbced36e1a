mod exec_log;
pub use exec_log::{ExecLog, Executed};

mod logging_executor;
pub use logging_executor::LoggingExecutor;

mod mock;
pub use mock::MockExecutor;

pub mod models;

pub use std_util::*;

/// Installs a tracing subscriber honoring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[macro_export]
macro_rules! models {
    (
        $( $model:ident ),*
    ) => {{
        let mut builder = crouton::Db::builder();
        $( builder.register::<$model>(); )*
        builder
    }};
}
