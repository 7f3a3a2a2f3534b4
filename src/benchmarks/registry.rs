//! Registration of named benchmark cases.
//!
//! Every case combines one operation, one element type and one size. Runtime
//! sized cases are generic over the element type and instantiated once per
//! type; compile-time sized cases are additionally generic over the buffer
//! length.

use super::benchmark_types::{MeasurementSettings, PerformanceResults, SizeSweep, SuiteConfig};
use super::performance_metrics::State;
use crate::buffer::{ArrayWorkspace, Storage, VecWorkspace, Workspace};
use crate::element::{Element, ElementType};
use crate::operations::{Operation, SizeParameter, bytes_moved};
use std::hint::black_box;

/// A benchmark routine, invoked once per run with the harness state.
pub type Routine = Box<dyn FnMut(&mut State)>;

/// A named, independently runnable benchmark.
pub struct BenchmarkCase {
    name: String,
    operation: Operation,
    element: ElementType,
    size: SizeParameter,
    routine: Routine,
}

impl BenchmarkCase {
    pub fn new(
        name: String,
        operation: Operation,
        element: ElementType,
        size: SizeParameter,
        routine: Routine,
    ) -> Self {
        Self {
            name,
            operation,
            element,
            size,
            routine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn size(&self) -> SizeParameter {
        self.size
    }

    /// Runs the case once under `settings`.
    pub fn run(&mut self, settings: MeasurementSettings) -> PerformanceResults {
        let mut state = State::new(self.size.value(), settings);
        (self.routine)(&mut state);
        state.into_results(&self.name)
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .field("operation", &self.operation)
            .field("element", &self.element)
            .field("size", &self.size)
            .finish()
    }
}

/// Runs `operation` once and passes the output buffer through `black_box`,
/// so element-wise results count as used.
pub fn apply_observed<T: Element, S: Storage<T>>(
    operation: Operation,
    workspace: &mut Workspace<T, S>,
) -> Option<T> {
    let result = operation.apply(workspace);
    black_box(workspace.out());
    result
}

/// Routine over runtime-sized buffers whose length comes from the state.
pub fn runtime_routine<T: Element>(operation: Operation) -> Routine {
    Box::new(move |state: &mut State| {
        let size = SizeParameter::new(operation.size_unit(), state.size());
        let len = size.element_count(T::size());
        let mut workspace = VecWorkspace::<T>::new(len);

        state.iter(|| apply_observed(operation, &mut workspace));

        if operation.reports_bytes() {
            let bytes = bytes_moved::<T>(len, state.iterations());
            state.set_bytes_processed(bytes);
        }
    })
}

/// Routine over compile-time-sized buffers of `N` elements.
pub fn static_routine<T: Element, const N: usize>(operation: Operation) -> Routine {
    Box::new(move |state: &mut State| {
        let mut workspace = ArrayWorkspace::<T, N>::fixed();

        state.iter(|| apply_observed(operation, &mut workspace));

        if operation.reports_bytes() {
            let bytes = bytes_moved::<T>(N, state.iterations());
            state.set_bytes_processed(bytes);
        }
    })
}

/// Ordered collection of benchmark cases.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<BenchmarkCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the full suite described by `config`.
    pub fn default_suite(config: &SuiteConfig) -> Self {
        let mut registry = Self::new();

        for &element in &config.element_types {
            registry.register_sweep(Operation::Add, element, &config.add_sweep);
        }
        for &element in &config.element_types {
            registry.register_sweep(Operation::Copy, element, &config.copy_sweep);
        }

        registry.register_static::<f32, 256>(Operation::Multiply);
        registry.register_static::<f32, 1024>(Operation::Multiply);
        registry.register_static::<f32, 4096>(Operation::Multiply);
        registry.register_static::<f32, 8192>(Operation::Multiply);

        registry.register_fixed::<f32>(Operation::Multiply, config.fixed_length);
        registry.register_fixed::<f32>(Operation::DotProduct, config.fixed_length);

        registry
    }

    pub fn register(&mut self, case: BenchmarkCase) {
        self.cases.push(case);
    }

    /// Registers `operation` for every size in `sweep`, instantiated for `element`.
    pub fn register_sweep(&mut self, operation: Operation, element: ElementType, sweep: &SizeSweep) {
        match element {
            ElementType::F32 => self.register_typed::<f32>(operation, sweep),
            ElementType::F64 => self.register_typed::<f64>(operation, sweep),
            ElementType::I32 => self.register_typed::<i32>(operation, sweep),
        }
    }

    /// Registers `<operation>/<type>/<size>` for every size in `sweep`.
    pub fn register_typed<T: Element>(&mut self, operation: Operation, sweep: &SizeSweep) {
        for size in sweep.sizes() {
            self.register(BenchmarkCase::new(
                format!("{}/{}/{}", operation, T::TYPE, size),
                operation,
                T::TYPE,
                SizeParameter::new(operation.size_unit(), size),
                runtime_routine::<T>(operation),
            ));
        }
    }

    /// Registers `<operation>_static/<N>` over `[T; N]` buffers.
    pub fn register_static<T: Element, const N: usize>(&mut self, operation: Operation) {
        self.register(BenchmarkCase::new(
            format!("{}_static/{}", operation, N),
            operation,
            T::TYPE,
            SizeParameter::Elements(N),
            static_routine::<T, N>(operation),
        ));
    }

    /// Registers `<operation>_fixed` over runtime buffers of `len` elements.
    pub fn register_fixed<T: Element>(&mut self, operation: Operation, len: usize) {
        self.register(BenchmarkCase::new(
            format!("{}_fixed", operation),
            operation,
            T::TYPE,
            SizeParameter::Elements(len),
            runtime_routine::<T>(operation),
        ));
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.name())
    }

    pub fn get(&self, name: &str) -> Option<&BenchmarkCase> {
        self.cases.iter().find(|case| case.name == name)
    }

    pub fn cases_mut(&mut self) -> impl Iterator<Item = &mut BenchmarkCase> {
        self.cases.iter_mut()
    }
}
