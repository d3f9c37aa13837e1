#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use sprocket_core::backend::RecordingBackend;
use sprocket_core::compile;
use sprocket_core::convert_case::Case;
use sprocket_core::problem::ProblemBuilder;
use sprocket_core::problem::Task;
use sprocket_core::statistics::statistic_logging::configure_statistic_logging;
use sprocket_core::CompileOptions;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn compilation_statistics_are_written_with_the_configured_casing() {
    let buffer = SharedBuffer::default();
    configure_statistic_logging(
        "%%%sprocket",
        Some("%%%end"),
        Some(Case::Camel),
        Some(Box::new(buffer.clone())),
    );

    let mut builder = ProblemBuilder::default();
    let machine = builder.add_machine();
    let task = builder.add_task(Task::new());
    let _ = builder.add_mode(task, 3, [(machine, 1)]);
    let data = builder.build().unwrap();
    let compiled = compile(
        &data,
        &mut RecordingBackend::default(),
        CompileOptions::default(),
    )
    .unwrap();

    compiled.statistics.log();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines = output.lines().collect::<Vec<_>>();
    assert!(lines.contains(&"%%%sprocket numIntervals=3"));
    assert!(lines.contains(&"%%%sprocket numExactlyOneConstraints=1"));
    assert_eq!(lines.last(), Some(&"%%%end"));
}
