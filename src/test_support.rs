use std::{
    borrow::Cow,
    collections::BTreeSet,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{
    class::{MethodDescriptor, TestClass},
    classify::{FrameworkClassifier, KnownTypes, MarkerNames},
    engine::{ExecutionBatch, ExecutionEngine},
    error::{ReportError, TestSetFailed},
    report::{ConsoleOutputReceiver, OutputStream, ReportEntry, Reporter, ReporterFactory, RunListener},
    suite::NameableSuite,
};

#[derive(Default)]
pub struct Names(pub Vec<Cow<'static, str>>);

impl<const N: usize> From<[&'static str; N]> for Names {
    fn from(value: [&'static str; N]) -> Self {
        Self(value.into_iter().map(Cow::Borrowed).collect())
    }
}

#[derive(Default)]
pub struct BuildClass {
    pub name: Cow<'static, str>,
    pub is_abstract: bool,
    pub supertypes: Names,
    pub annotations: Names,
    pub methods: Vec<MethodDescriptor>,
}

impl From<BuildClass> for TestClass {
    fn from(value: BuildClass) -> Self {
        TestClass {
            name: value.name,
            is_abstract: value.is_abstract,
            supertypes: value.supertypes.0,
            annotations: value.annotations.0,
            methods: value.methods,
        }
    }
}

macro_rules! class {
    ($name:expr $(, $field:ident: $value:expr)* $(,)?) => {
        $crate::class::TestClass::from($crate::test_support::BuildClass {
            name: From::from($name),
            $($field: From::from($value),)*
            ..Default::default()
        })
    };
}

pub(crate) use class;

pub fn full_classifier() -> FrameworkClassifier {
    FrameworkClassifier::probe(&KnownTypes::all_markers(), &MarkerNames::default())
}

pub fn names(classes: &[Arc<TestClass>]) -> Vec<&str> {
    classes.iter().map(|class| class.name.as_ref()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started(ReportEntry),
    Completed(ReportEntry),
    Run {
        classes: Vec<String>,
        report_directory: PathBuf,
        foreign: bool,
        suite_name: Option<String>,
        reported_suite: String,
        selection: String,
    },
}

/// Shared between reporters and engine so their events interleave in call order.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn runs(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, Event::Run { .. }))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    log: EventLog,
    fail_start: bool,
    fail_finish: bool,
    stdout: Mutex<Vec<u8>>,
    stderr: Mutex<Vec<u8>>,
}

impl RecordingReporter {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn with_failing_start(self, fail_start: bool) -> Self {
        Self { fail_start, ..self }
    }

    pub fn with_failing_finish(self, fail_finish: bool) -> Self {
        Self {
            fail_finish,
            ..self
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8(self.stdout.lock().unwrap().clone()).unwrap()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8(self.stderr.lock().unwrap().clone()).unwrap()
    }
}

impl RunListener for RecordingReporter {
    fn test_set_starting(&self, entry: &ReportEntry) -> Result<(), ReportError> {
        if self.fail_start {
            return Err(ReportError::Closed);
        }
        self.log.push(Event::Started(entry.clone()));
        Ok(())
    }

    fn test_set_completed(&self, entry: &ReportEntry) -> Result<(), ReportError> {
        if self.fail_finish {
            return Err(ReportError::Closed);
        }
        self.log.push(Event::Completed(entry.clone()));
        Ok(())
    }
}

impl ConsoleOutputReceiver for RecordingReporter {
    fn write_test_output(&self, output: &[u8], stream: OutputStream) {
        let buffer = match stream {
            OutputStream::Stdout => &self.stdout,
            OutputStream::Stderr => &self.stderr,
        };
        buffer.lock().unwrap().extend_from_slice(output);
    }
}

/// Hands out reporters that all record into one log and remembers them.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub log: EventLog,
    pub fail_start: bool,
    pub fail_finish: bool,
    pub created: Mutex<Vec<Arc<RecordingReporter>>>,
}

impl RecordingFactory {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn reporters(&self) -> Vec<Arc<RecordingReporter>> {
        self.created.lock().unwrap().clone()
    }
}

impl ReporterFactory for RecordingFactory {
    type Reporter = RecordingReporter;

    fn create_reporter(&self) -> Arc<Self::Reporter> {
        let reporter = Arc::new(
            RecordingReporter::new(self.log.clone())
                .with_failing_start(self.fail_start)
                .with_failing_finish(self.fail_finish),
        );
        self.created.lock().unwrap().push(Arc::clone(&reporter));
        reporter
    }
}

/// Records each batch and prints one line per class through the capture macros.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub log: EventLog,
    pub failing: BTreeSet<String>,
}

impl RecordingEngine {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            failing: BTreeSet::new(),
        }
    }

    pub fn with_failing(mut self, class: &str) -> Self {
        self.failing.insert(class.to_owned());
        self
    }
}

impl ExecutionEngine for RecordingEngine {
    fn run(
        &self,
        batch: ExecutionBatch<'_>,
        _: &dyn Reporter,
        suite: &dyn NameableSuite,
    ) -> Result<(), TestSetFailed> {
        let classes: Vec<String> = batch.class_names().map(str::to_owned).collect();
        if let Some(failing) = classes.iter().find(|class| self.failing.contains(*class)) {
            return Err(TestSetFailed::engine(
                [failing.as_str()],
                batch.report_directory,
                "setup failed",
            ));
        }

        for class in &classes {
            crate::println!("running {class}");
        }
        self.log.push(Event::Run {
            classes,
            report_directory: batch.report_directory.to_path_buf(),
            foreign: batch.options.foreign_framework,
            suite_name: batch.options.suite_name.clone(),
            reported_suite: suite.suite_name().to_owned(),
            selection: batch.selection.describe(),
        });
        Ok(())
    }
}
