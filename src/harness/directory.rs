use std::{path::Path, slice, sync::Arc};

use crate::{
    capture::OutputCaptureGuard,
    class::TestClass,
    classify::{FrameworkClassifier, TypeProbe},
    engine::{ExecutionBatch, ExecutionEngine},
    error::TestSetFailed,
    filter::SelectionPredicate,
    options::{OptionSet, SuiteConfig},
    order::{RunOrderCalculator, ScanOrder},
    registry::{ScanResult, TestSetRegistry, TestSets},
    report::{Reporter, ReporterFactory},
    suite::{NameableSuite, SuiteRun, finish_suite, start_suite},
    tests_to_run::TestsToRun,
};

use super::partition::{ExecutionStrategy, Partition};

/// Reporting source used in suite events.
pub const SUITE_TYPE: &str = "suitecase::DirectoryTestSuite";

/// Runs a directory of scanned test classes through the native and the
/// foreign framework engine.
///
/// Classes are classified once per `execute` call and dispatched in batches,
/// each batch bracketed by suite lifecycle events on a fresh reporter.
/// Everything happens on the calling thread, one engine call at a time.
pub struct DirectoryTestSuite<Engine, Scan = Vec<Arc<TestClass>>, Order = ScanOrder> {
    config: SuiteConfig,
    foreign_options: OptionSet,
    selection: SelectionPredicate,
    classifier: FrameworkClassifier,
    engine: Engine,
    scan_result: Scan,
    run_order: Order,
    registry: TestSetRegistry,
}

impl<Engine> DirectoryTestSuite<Engine> {
    /// Markers named in `config` are resolved through `probe` here, once.
    pub fn new<P: TypeProbe + ?Sized>(
        config: SuiteConfig,
        selection: SelectionPredicate,
        probe: &P,
        engine: Engine,
    ) -> Self {
        let classifier = FrameworkClassifier::probe(probe, &config.markers);
        let foreign_options = config.options.foreign();
        Self {
            config,
            foreign_options,
            selection,
            classifier,
            engine,
            scan_result: Vec::new(),
            run_order: ScanOrder,
            registry: TestSetRegistry::new(),
        }
    }
}

impl<Engine, Scan, Order> DirectoryTestSuite<Engine, Scan, Order> {
    pub fn with_scan_result<WithScan: ScanResult>(
        self,
        scan_result: WithScan,
    ) -> DirectoryTestSuite<Engine, WithScan, Order> {
        DirectoryTestSuite {
            config: self.config,
            foreign_options: self.foreign_options,
            selection: self.selection,
            classifier: self.classifier,
            engine: self.engine,
            scan_result,
            run_order: self.run_order,
            registry: self.registry,
        }
    }

    pub fn with_run_order<WithOrder: RunOrderCalculator>(
        self,
        run_order: WithOrder,
    ) -> DirectoryTestSuite<Engine, Scan, WithOrder> {
        DirectoryTestSuite {
            config: self.config,
            foreign_options: self.foreign_options,
            selection: self.selection,
            classifier: self.classifier,
            engine: self.engine,
            scan_result: self.scan_result,
            run_order,
            registry: self.registry,
        }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn classifier(&self) -> &FrameworkClassifier {
        &self.classifier
    }

    pub fn selection(&self) -> &SelectionPredicate {
        &self.selection
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl<Engine, Scan, Order> NameableSuite for DirectoryTestSuite<Engine, Scan, Order> {
    fn suite_type(&self) -> &str {
        SUITE_TYPE
    }

    fn suite_name(&self) -> &str {
        self.config.options.suite_name()
    }
}

impl<Engine: ExecutionEngine, Scan, Order> DirectoryTestSuite<Engine, Scan, Order> {
    /// Dispatch `tests`, see [`ExecutionStrategy`] for how.
    pub fn execute<F: ReporterFactory>(
        &self,
        tests: TestsToRun,
        reporter_factory: &F,
    ) -> Result<(), TestSetFailed> {
        let Some(strategy) = ExecutionStrategy::select(&tests) else {
            tracing::debug!("no test classes to run");
            return Ok(());
        };

        tracing::debug!(?strategy, "executing test classes");
        match strategy {
            ExecutionStrategy::LazyStreamed | ExecutionStrategy::EagerSingle => tests
                .into_iter()
                .try_for_each(|class| self.execute_single_class(&class, reporter_factory)),
            ExecutionStrategy::EagerMulti => self.execute_multi(tests, reporter_factory),
        }
    }

    /// Run one previously located test set.
    ///
    /// # Panics
    ///
    /// If [`locate_test_sets`](Self::locate_test_sets) was never called.
    pub fn execute_named<F: ReporterFactory>(
        &self,
        test_set_name: &str,
        reporter_factory: &F,
    ) -> Result<(), TestSetFailed> {
        let sets = self
            .registry
            .sets()
            .expect("locate_test_sets must be called before executing a named test set");
        let test_set = sets
            .get(test_set_name)
            .ok_or_else(|| TestSetFailed::UnknownTestSet {
                name: test_set_name.to_owned(),
            })?;

        self.dispatch(reporter_factory, self, |reporter, suite| {
            self.run_engine(
                slice::from_ref(test_set.test_class()),
                &self.config.options,
                &self.config.reports_directory,
                reporter,
                suite,
            )
        })
    }

    fn execute_single_class<F: ReporterFactory>(
        &self,
        class: &Arc<TestClass>,
        reporter_factory: &F,
    ) -> Result<(), TestSetFailed> {
        let options = match self.classifier.is_foreign(class) {
            true => &self.foreign_options,
            false => &self.config.options,
        };
        let options = options.clone().with_suite_name(&*class.name);
        let suite = SuiteRun::new(SUITE_TYPE, &options);

        self.dispatch(reporter_factory, &suite, |reporter, suite| {
            self.run_engine(
                slice::from_ref(class),
                &options,
                &self.config.reports_directory,
                reporter,
                suite,
            )
        })
    }

    fn execute_multi<F: ReporterFactory>(
        &self,
        tests: TestsToRun,
        reporter_factory: &F,
    ) -> Result<(), TestSetFailed> {
        let partition = Partition::split(tests, &self.classifier);
        let (native_reports, foreign_reports) =
            partition.report_directories(&self.config.reports_directory);

        self.dispatch(reporter_factory, self, |reporter, suite| {
            self.run_engine(
                &partition.native,
                &self.config.options,
                &native_reports,
                reporter,
                suite,
            )?;
            if !partition.foreign.is_empty() {
                self.run_engine(
                    &partition.foreign,
                    &self.foreign_options,
                    &foreign_reports,
                    reporter,
                    suite,
                )?;
            }
            Ok(())
        })
    }

    /// One reporter, one armed capture and one start/finish pair around `body`.
    fn dispatch<F, B>(
        &self,
        reporter_factory: &F,
        suite: &dyn NameableSuite,
        body: B,
    ) -> Result<(), TestSetFailed>
    where
        F: ReporterFactory,
        B: FnOnce(&dyn Reporter, &dyn NameableSuite) -> Result<(), TestSetFailed>,
    {
        let reporter = reporter_factory.create_reporter();
        let _capture = OutputCaptureGuard::arm(reporter.clone());

        start_suite(&*reporter, suite);
        body(&*reporter, suite)?;
        finish_suite(&*reporter, suite)?;
        Ok(())
    }

    fn run_engine(
        &self,
        classes: &[Arc<TestClass>],
        options: &OptionSet,
        report_directory: &Path,
        reporter: &dyn Reporter,
        suite: &dyn NameableSuite,
    ) -> Result<(), TestSetFailed> {
        let batch = ExecutionBatch {
            classes,
            source_directory: &self.config.test_source_directory,
            options,
            report_directory,
            selection: &self.selection,
        };
        tracing::debug!(
            classes = classes.len(),
            foreign = options.foreign_framework,
            report_directory = %report_directory.display(),
            "dispatching batch"
        );
        self.engine.run(batch, reporter, suite)
    }
}

impl<Engine, Scan: ScanResult, Order: RunOrderCalculator> DirectoryTestSuite<Engine, Scan, Order> {
    /// Build the named test set registry from the scan result.
    ///
    /// # Panics
    ///
    /// If called a second time after a successful build.
    pub fn locate_test_sets(&mut self) -> Result<&TestSets, TestSetFailed> {
        self.registry.build(&self.scan_result, &self.run_order)
    }
}
