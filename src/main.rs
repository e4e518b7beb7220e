//! Scope Defer demos
//!
//! Walks through file, socket, resource and fallback-stack scenarios. Every cleanup logs
//! as it fires, so the output shows the scope-exit order.

use std::{env, io};

use uuid::Uuid;

mod constants;
use constants::*;
mod demos;

/// Main function, runs the demo named by the first argument
#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let demo = env::args().nth(1).unwrap_or_else(|| DEFAULT_DEMO.to_owned());
    let work_dir = env::temp_dir().join(format!("{WORK_DIR_PREFIX}-{}", Uuid::new_v4()));
    log::info!(
        "

-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
    SCOPE DEFER DEMOS

    - demo:     {demo}
    - work_dir: {}
-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
",
        work_dir.display()
    );

    match demo.as_str() {
        "file" => demos::file::run(&work_dir)?,
        "socket" => demos::socket::run().await?,
        "resource" => demos::resource::run()?,
        "stack" => demos::stack::run()?,
        "all" => {
            demos::file::run(&work_dir)?;
            demos::socket::run().await?;
            demos::resource::run()?;
            demos::stack::run()?;
        }
        other => {
            log::error!("unknown demo {other}, expected one of {DEMOS:?}");
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown demo {other}"),
            ));
        }
    }

    log::info!("All demos for {demo} completed");
    Ok(())
}
