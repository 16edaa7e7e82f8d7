//! Parallel for-each over mutable slices.

use std::thread;

/// Below this many elements per hardware thread the split overhead is not
/// worth it and the call runs sequentially.
const MIN_ITEMS_PER_THREAD: usize = 4;

/// Apply `func` to every element of `items`, splitting the slice into
/// contiguous blocks across the available hardware threads.
///
/// Small inputs run on the calling thread. `func` must not rely on any
/// particular visit order across blocks.
pub fn parallel_for_each<T, F>(items: &mut [T], func: F)
where
    T: Send,
    F: Fn(&mut T) + Sync,
{
    let threads = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    if threads <= 1 || items.len() < threads * MIN_ITEMS_PER_THREAD {
        for item in items {
            func(item);
        }
        return;
    }

    let block_size = (items.len() + threads - 1) / threads;
    log::debug!(
        "parallel_for_each: {} items in blocks of {} across {} threads",
        items.len(),
        block_size,
        threads
    );

    crossbeam::scope(|scope| {
        for block in items.chunks_mut(block_size) {
            let func = &func;
            scope.spawn(move |_| {
                for item in block {
                    func(item);
                }
            });
        }
    })
    .expect("worker thread panicked");
}
