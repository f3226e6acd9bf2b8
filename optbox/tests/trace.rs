//! Lifecycle tracing through the `log` facade.
#![cfg(feature = "log")]

use std::sync::{Mutex, OnceLock};

use optbox::{OptionalBox, Transition};

static LOGGER: CaptureLog = CaptureLog {
	records: OnceLock::new(),
};

struct CaptureLog {
	records: OnceLock<Mutex<Vec<LogRecord>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogRecord {
	level:   log::Level,
	target:  String,
	message: String,
}

impl CaptureLog {
	fn records(&self) -> &Mutex<Vec<LogRecord>> {
		self.records.get_or_init(|| Mutex::new(Vec::new()))
	}
}

impl log::Log for CaptureLog {
	fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
		true
	}

	fn log(&self, record: &log::Record<'_>) {
		self.records().lock().unwrap().push(LogRecord {
			level:   record.level(),
			target:  record.target().to_string(),
			message: format!("{}", record.args()),
		});
	}

	fn flush(&self) {
		// no-op
	}
}

fn init_logger() {
	// Only one test lives in this binary, so the logger is installed once.
	log::set_logger(&LOGGER).unwrap();
	log::set_max_level(log::LevelFilter::Trace);
}

fn drain() -> Vec<String> {
	let mut records = LOGGER.records().lock().unwrap();
	assert!(
		records
			.iter()
			.all(|r| r.level == log::Level::Trace && r.target == "optbox")
	);
	records.drain(..).map(|r| r.message).collect()
}

fn expect(transition: Transition, type_name: &str) -> String {
	format!("{transition}: {type_name}")
}

#[test]
fn every_transition_emits_one_trace_record() {
	init_logger();
	let string = std::any::type_name::<String>();

	let mut b = OptionalBox::<String>::new();
	assert!(drain().is_empty());

	b.assign(String::from("a"));
	assert_eq!(drain(), [expect(Transition::Construct, string)]);

	b.assign(String::from("b"));
	assert_eq!(drain(), [expect(Transition::Assign, string)]);

	b.emplace(String::from("c"));
	assert_eq!(drain(), [expect(Transition::Emplace, string)]);

	let mut c = b.clone();
	assert_eq!(drain(), [expect(Transition::Clone, string)]);

	let mut d = OptionalBox::move_from(&mut c);
	assert_eq!(drain(), [expect(Transition::MoveConstruct, string)]);

	d.move_assign(&mut b);
	assert_eq!(drain(), [expect(Transition::MoveAssign, string)]);

	assert_eq!(c.take().as_deref(), Some(""));
	assert_eq!(drain(), [expect(Transition::Take, string)]);

	c.reset();
	assert!(drain().is_empty());

	drop(c);
	assert!(drain().is_empty());

	drop(d);
	assert_eq!(drain(), [expect(Transition::Drop, string)]);

	b.reset();
	assert_eq!(drain(), [expect(Transition::Reset, string)]);
}
