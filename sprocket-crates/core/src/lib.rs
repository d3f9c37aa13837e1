//! Compiles resource-constrained scheduling problems into constraint models.
//!
//! A problem is described with a [`ProblemBuilder`], compiled with [`compile`] and handed to a
//! solver through an implementation of the [`Backend`] trait. The compiler knows nothing about
//! the solver; [`RecordingBackend`] records what it would have been asked to do.
//!
//! # Example
//! ```
//! use sprocket_core::backend::RecordingBackend;
//! use sprocket_core::compile;
//! use sprocket_core::problem::Job;
//! use sprocket_core::problem::ProblemBuilder;
//! use sprocket_core::problem::Task;
//! use sprocket_core::CompileOptions;
//!
//! let mut builder = ProblemBuilder::default();
//! let machines = [builder.add_machine(), builder.add_machine()];
//!
//! let job = builder.add_job(Job::new());
//! let cut = builder.add_task(Task::new().in_job(job));
//! let drill = builder.add_task(Task::new().in_job(job));
//! for machine in machines {
//!     let _ = builder.add_mode(cut, 3, [(machine, 1)]);
//!     let _ = builder.add_mode(drill, 2, [(machine, 1)]);
//! }
//! builder.add_end_before_start(cut, drill, 0);
//!
//! let data = builder.build().unwrap();
//! let mut backend = RecordingBackend::default();
//! let compiled = compile(&data, &mut backend, CompileOptions::default()).unwrap();
//!
//! assert_eq!(compiled.statistics.total_constraints(), backend.model().constraints().len());
//! ```
//!
//! [`ProblemBuilder`]: problem::ProblemBuilder
//! [`Backend`]: backend::Backend
//! [`RecordingBackend`]: backend::RecordingBackend

pub mod backend;
pub mod compiler;
pub mod containers;
pub mod problem;
pub mod statistics;
pub mod topology;
pub mod variables;

pub use compiler::compile;
pub use compiler::CompileError;
pub use compiler::CompileOptions;
pub use compiler::CompiledModel;
pub use convert_case;
