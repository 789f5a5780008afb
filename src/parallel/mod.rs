//! The data-parallel primitive consumed by the narrowphase.
//!
//! [`parallel_for`] runs a closure over an index range on the global
//! `rayon` pool. Iterations run on worker threads with no ordering
//! guarantees; the completion [`Job`] is invoked on the calling thread once
//! every iteration has finished.

use core::marker::PhantomData;
use rayon::prelude::*;

/// A one-shot completion callback.
pub struct Job {
    f: Option<Box<dyn FnOnce() + Send>>,
}

impl Job {
    /// Creates a job running `f` when invoked.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Job {
            f: Some(Box::new(f)),
        }
    }

    /// A job that does nothing.
    pub fn noop() -> Self {
        Job { f: None }
    }

    /// Runs the job.
    pub fn run(mut self) {
        if let Some(f) = self.f.take() {
            f()
        }
    }
}

/// Runs `f(i)` for every `i` in `first..last` on the worker pool, splitting
/// the range in chunks of at least `chunk` indices, then invokes
/// `completion`.
pub fn parallel_for<F>(first: usize, last: usize, chunk: usize, completion: Job, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    (first..last)
        .into_par_iter()
        .with_min_len(chunk.max(1))
        .for_each(f);

    completion.run();
}

/// A mutable slice shareable across the workers of a parallel region.
///
/// Workers index disjoint elements; the usual aliasing guarantees are the
/// caller's responsibility, which is why [`ParSliceMut::get_mut`] is
/// unsafe.
pub struct ParSliceMut<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<'a, T: Send> Send for ParSliceMut<'a, T> {}
unsafe impl<'a, T: Send> Sync for ParSliceMut<'a, T> {}

impl<'a, T> ParSliceMut<'a, T> {
    /// Wraps `slice` for shared indexed access.
    pub fn new(slice: &'a mut [T]) -> Self {
        ParSliceMut {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the slice is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A mutable reference to the `i`-th element.
    ///
    /// # Safety
    ///
    /// At most one thread may access index `i` while the returned reference
    /// is alive.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self, i: usize) -> &mut T {
        assert!(i < self.len);
        &mut *self.ptr.add(i)
    }
}
