#![no_main]

use libfuzzer_sys::fuzz_target;

use streambench_core::fork_join::ForkJoin;

fuzz_target!(|input: (u8, u16, Vec<u8>)| {
    let (threads, min_len, data) = input;
    let threads = usize::from(threads % 16) + 1;
    let Ok(fj) = ForkJoin::new(threads, usize::from(min_len)) else {
        return;
    };

    let parts = fj.partition(&data);
    assert_eq!(parts.len(), fj.partition_count(data.len()));
    assert!(parts.len() <= threads);
    assert_eq!(parts.concat(), data);

    if let (Some(max), Some(min)) = (
        parts.iter().map(|p| p.len()).max(),
        parts.iter().map(|p| p.len()).min(),
    ) {
        assert!(max - min <= 1, "unbalanced partitions");
        if parts.len() > 1 {
            assert!(min >= fj.min_partition_len(), "partition below minimum");
        }
    }
});
