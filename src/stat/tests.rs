use super::*;

/// builds a [`CpuTime`] from its eight counters, in `/proc/stat` order.
fn cpu(counters: [u64; 8]) -> CpuTime {
    counters.map(UserHz::new).into()
}

mod snapshot_parse_tests {
    use super::*;

    // an excerpt in the shape of the `proc_stat(5)` man page example.
    const STAT: &str = "\
cpu  10132153 290696 3084719 46828483 16683 0 25195 0 175628 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 23933 0
cpu1 1393281 32967 572057 13343293 6131 0 17876 0 23934 0
cpu2 1393282 32968 572058 13343294 6132 0 17877 0 23935 0
page 5741 1808
swap 1 0
intr 1462898
ctxt 115315
btime 769041601
processes 86031
procs_running 6
procs_blocked 2
softirq 229245889 94 60001584 13619 5175704 2471304 28 51212741 59130143 0 51240672
";

    #[test]
    fn cores_in_source_order() {
        let Snapshot { cpus } = STAT.parse::<Snapshot>().unwrap();
        assert_eq!(cpus.len(), 3);
        assert_eq!(cpus[0].user, UserHz::new(1393280));
        assert_eq!(cpus[1].user, UserHz::new(1393281));
        assert_eq!(cpus[2].user, UserHz::new(1393282));
    }

    #[test]
    fn aggregate_is_excluded() {
        let snapshot = "cpu  1 2 3 4 5 6 7 8\n".parse::<Snapshot>().unwrap();
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn empty_source() {
        let snapshot = "".parse::<Snapshot>().unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn without_steal() {
        let Snapshot { cpus } = "cpu0 1 2 3 4 5 6 7".parse::<Snapshot>().unwrap();
        assert_eq!(cpus, vec![cpu([1, 2, 3, 4, 5, 6, 7, 0])]);
    }

    #[test]
    fn with_steal() {
        let Snapshot { cpus } = "cpu0 1 2 3 4 5 6 7 8".parse::<Snapshot>().unwrap();
        assert_eq!(cpus, vec![cpu([1, 2, 3, 4, 5, 6, 7, 8])]);
    }

    /// guest time is already counted in user time, so it is ignored.
    #[test]
    fn guest_is_ignored() {
        let Snapshot { cpus } = "cpu0 1 2 3 4 5 6 7 8 9 10".parse::<Snapshot>().unwrap();
        assert_eq!(cpus, vec![cpu([1, 2, 3, 4, 5, 6, 7, 8])]);
    }

    #[test]
    fn tabs_and_runs_of_spaces() {
        let Snapshot { cpus } = "cpu0\t1  2 3\t4 5 6 7".parse::<Snapshot>().unwrap();
        assert_eq!(cpus, vec![cpu([1, 2, 3, 4, 5, 6, 7, 0])]);
    }

    /// parse a cpu record that is missing one of its required times.
    #[test]
    fn missing_time() {
        let err = "cpu0 1 2 3 4 5 6".parse::<Snapshot>().unwrap_err();
        match err {
            StatReadError::MalformedRecord { record, fields } => {
                assert_eq!(record, "cpu0");
                assert_eq!(fields, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// the aggregate line is never validated, since it is never selected.
    #[test]
    fn short_aggregate_is_ignored() {
        let snapshot = "cpu 1 2\ncpu0 1 2 3 4 5 6 7".parse::<Snapshot>().unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn unparsable_time_is_zero() {
        let Snapshot { cpus } = "cpu0 1 two 3 -4 5 6 7 x".parse::<Snapshot>().unwrap();
        assert_eq!(cpus, vec![cpu([1, 0, 3, 0, 5, 6, 7, 0])]);
    }

    #[test]
    fn is_core() {
        assert!(Snapshot::is_core("cpu0"));
        assert!(Snapshot::is_core("cpu12"));
        assert!(!Snapshot::is_core("cpu"));
        assert!(!Snapshot::is_core("intr"));
        assert!(!Snapshot::is_core("softirq"));
    }
}

mod snapshot_read_tests {
    use {super::*, crate::source::MockStatFile};

    #[test]
    fn reads_from_source() {
        let stats = MockStatFile::new(["cpu 2 0 0 2 0 0 0\ncpu0 1 0 0 1 0 0 0\ncpu1 1 0 0 1 0 0 0\n"]);
        let snapshot = Snapshot::read(&stats).unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn unavailable_source() {
        let stats = MockStatFile::unavailable();
        let err = Snapshot::read(&stats).unwrap_err();
        assert!(matches!(err, StatReadError::SourceUnavailable(_)));
    }
}

mod measurement_tests {
    use super::*;

    fn usage(a: [u64; 8], b: [u64; 8]) -> f64 {
        Measurement::new(&cpu(a), &cpu(b)).percentage()
    }

    #[test]
    fn no_elapsed_time() {
        let a = [100, 0, 0, 900, 0, 0, 0, 0];
        assert_eq!(usage(a, a), 0.0);
    }

    /// totals are equal even though the individual counters moved.
    #[test]
    fn equal_totals() {
        assert_eq!(usage([10, 0, 0, 10, 0, 0, 0, 0], [5, 5, 0, 5, 5, 0, 0, 0]), 0.0);
    }

    #[test]
    fn only_idle_advances() {
        assert_eq!(usage([100, 0, 0, 900, 0, 0, 0, 0], [100, 0, 0, 950, 0, 0, 0, 0]), 0.0);
    }

    #[test]
    fn only_iowait_advances() {
        assert_eq!(usage([100, 0, 0, 900, 0, 0, 0, 0], [100, 0, 0, 900, 50, 0, 0, 0]), 0.0);
    }

    #[test]
    fn only_work_advances() {
        assert_eq!(usage([100, 0, 0, 900, 0, 0, 0, 0], [150, 0, 0, 900, 0, 0, 0, 0]), 100.0);
        assert_eq!(usage([0, 0, 0, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0, 0, 7]), 100.0);
    }

    #[test]
    fn work_is_proportional() {
        assert_eq!(usage([0; 8], [25, 0, 0, 75, 0, 0, 0, 0]), 25.0);
        assert_eq!(usage([0; 8], [10, 10, 10, 10, 10, 0, 0, 0]), 60.0);
    }

    #[test]
    fn scaling_is_invariant() {
        let a = [13, 2, 7, 400, 3, 1, 1, 0];
        let b = [40, 2, 19, 470, 9, 2, 3, 1];
        let expected = usage(a, b);
        for k in [2, 3, 10, 1_000] {
            let scaled = usage(a.map(|t| t * k), b.map(|t| t * k));
            assert!((scaled - expected).abs() < 1e-9, "{scaled} != {expected}");
        }
    }

    /// core 0 reports (user=100, idle=900) and then (user=150, idle=950).
    ///
    /// the total moves from 1000 to 1100, a delta of 100 rather than 150, and idle moves by 50,
    /// so the core was busy for half of the window.
    #[test]
    fn work_and_idle_advance_together() {
        let percent = usage([100, 0, 0, 900, 0, 0, 0, 0], [150, 0, 0, 950, 0, 0, 0, 0]);
        assert_eq!(percent, 50.0);
    }

    /// a regression is reported as-is rather than clamped, and does not panic.
    #[test]
    fn regressing_counters() {
        let percent = usage([100, 0, 0, 900, 0, 0, 0, 0], [90, 0, 0, 950, 0, 0, 0, 0]);
        assert_eq!(percent, -25.0);
    }

    #[test]
    fn idle_and_total() {
        let time = cpu([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(time.idle(), UserHz::new(9));
        assert_eq!(time.total(), UserHz::new(36));
    }
}
