use std::sync::{Arc, Barrier};
use std::thread;

use resolver_flags::{format_flags, table, FlagRegistry, UsageGroup};

const THREADS: usize = 8;

#[test]
fn first_use_from_many_threads_builds_one_registry() {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let registry = FlagRegistry::builtin();
                let rendered = format_flags(Some(table::WITH_INFO), Some(UsageGroup::AddRecord));
                (registry as *const FlagRegistry as usize, rendered)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let (first, _) = &results[0];
    for (addr, rendered) in &results {
        assert_eq!(addr, first, "every thread sees the same registry");
        assert_eq!(rendered, "WithInfo [4000 0000 0000 0000]");
    }
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry: &'static FlagRegistry = FlagRegistry::builtin();
    thread::scope(|scope| {
        for group in UsageGroup::ALL {
            scope.spawn(move || {
                let members = registry.names_of(group).unwrap();
                for (name, value) in members {
                    assert_eq!(registry.get_flag(name).unwrap().value(), *value);
                }
            });
        }
    });
}
