//! dockhand - declarative containers driven through the engine CLI
//!
//! Describe a container with [`ContainerSpec`], then pull, create or start it.
//! Every operation renders an exact engine command line and runs it as a
//! subprocess; a successful create/start yields a [`ContainerHandle`] for the
//! rest of the container's life.
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use dockhand::ContainerSpec;
//!
//! let spec = ContainerSpec::builder("nginx")
//!     .name("web")
//!     .map_port(8080, 80)
//!     .build()?;
//!
//! spec.pull_image().await?;
//! let container = spec.start().await?;
//!
//! container.add_file_from_string("/usr/share/nginx/html/index.html", "hello").await?;
//! let output = container.execute("nginx -t").await?;
//! println!("exit code: {}", output.exit_code);
//!
//! container.stop().await?;
//! container.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod container;
pub mod errors;
pub mod mapping;
pub mod process;
pub mod registry;
pub mod runtime;
pub mod spec;

pub use command::{CommandLine, EngineCommand};
pub use container::{ContainerHandle, ContainerId, ExecScript};
pub use errors::{DockhandError, DockhandResult};
pub use mapping::{EnvMapping, LabelMapping, Mapping, PortMapping, VolumeMapping};
pub use process::{OutputChunk, OutputStream, ProcessExecutor, ProcessOutput, SystemExecutor};
pub use registry::RegistryClient;
pub use runtime::EngineOptions;
pub use runtime::constants::container::DEFAULT_STREAM_TIMEOUT;
pub use spec::{ContainerSpec, ContainerSpecBuilder, StartVerb};
