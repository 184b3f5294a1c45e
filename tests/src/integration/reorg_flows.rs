//! # Reorg Integration Flows
//!
//! Drives `ReorgService` the way the syncer does: a chain store is populated,
//! candidate heads arrive, and each one is evaluated and adopted.
//!
//! ## Flows Tested:
//!
//! 1. **Fork switch**: head on an 11-tipset fork, candidate on a 14-tipset fork
//! 2. **Extension**: candidate built directly on the head
//! 3. **Same-height superset**: candidate adds a block next to the head's block
//! 4. **Ping-pong**: switching back and forth between two forks
//! 5. **Random forks with null rounds**: ancestor is always the branch point
//! 6. **Unrelated chains**: exhaustion, head unchanged
//! 7. **Log output**: search steps and the adopted head's height are logged

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use qc_18_chain_reorg::metrics::{HEAD_EXTENSIONS, REORGS, SEARCH_EXHAUSTED};
    use qc_18_chain_reorg::test_utils::ChainBuilder;
    use qc_18_chain_reorg::{
        find_common_ancestor, ChainStore, InMemoryChainStore, ReorgApi, ReorgConfig, ReorgDiff,
        ReorgError, ReorgService, TipSet, TipSetIterator,
    };
    use quantum_telemetry::init_test_tracing;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use tracing_subscriber::fmt::MakeWriter;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service(builder: ChainBuilder, config: ReorgConfig) -> ReorgService<InMemoryChainStore> {
        init_test_tracing("qc_18_chain_reorg=debug");
        ReorgService::new(Arc::new(builder.into_store()), config)
    }

    /// Grow `len` tipsets on `parent`, randomly inserting null rounds.
    fn grow_with_gaps(
        builder: &mut ChainBuilder,
        parent: &TipSet,
        len: u64,
        rng: &mut StdRng,
    ) -> TipSet {
        let mut head = parent.clone();
        for _ in 0..len {
            head = if rng.gen_bool(0.3) {
                let nulls = rng.gen_range(1..4);
                builder.grow_after_null_rounds(&head, nulls)
            } else {
                builder.grow(&head, 1)
            };
        }
        head
    }

    /// In-memory log sink for asserting on formatted events.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_fork_switch() {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 10);
        let old = builder.grow(&common, 11);
        let new = builder.grow(&common, 14);
        builder.set_head(&old);
        let service = service(builder, ReorgConfig::default());
        let reorgs_before = REORGS.get();

        let eval = service.switch_head(&new).unwrap();

        assert!(eval.is_reorg);
        assert_eq!(eval.common_ancestor, common);
        assert_eq!(
            eval.diff,
            ReorgDiff {
                dropped: 11,
                added: 14
            }
        );
        assert_eq!(service.store().head(), Some(new));
        assert!(REORGS.get() > reorgs_before);
    }

    #[test]
    fn test_extension() {
        let mut builder = ChainBuilder::new();
        let old = builder.grow(&builder.genesis(), 10);
        let new = builder.grow(&old, 2);
        builder.set_head(&old);
        let service = service(builder, ReorgConfig::default());
        let extensions_before = HEAD_EXTENSIONS.get();

        let eval = service.switch_head(&new).unwrap();

        assert!(!eval.is_reorg);
        assert_eq!(eval.common_ancestor, old);
        assert_eq!(
            eval.diff,
            ReorgDiff {
                dropped: 0,
                added: 2
            }
        );
        assert!(HEAD_EXTENSIONS.get() > extensions_before);
    }

    #[test]
    fn test_same_height_superset() {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 10);
        let old = builder.grow(&common, 1);
        let superset = builder.superset(&old);
        builder.set_head(&old);
        let service = service(builder, ReorgConfig::default());

        let eval = service.switch_head(&superset).unwrap();

        assert!(!eval.is_reorg);
        assert_eq!(eval.common_ancestor, common);
        assert_eq!(
            eval.diff,
            ReorgDiff {
                dropped: 1,
                added: 1
            }
        );
        assert_eq!(service.store().head(), Some(superset));
    }

    #[test]
    fn test_ping_pong_between_forks() {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 3);
        let a = builder.grow(&common, 4);
        let b = builder.grow(&common, 6);
        let a_ext = builder.grow(&a, 5);
        builder.set_head(&a);
        let service = service(builder, ReorgConfig::default());

        let to_b = service.switch_head(&b).unwrap();
        assert!(to_b.is_reorg);
        assert_eq!(
            to_b.diff,
            ReorgDiff {
                dropped: 4,
                added: 6
            }
        );

        let back_to_a = service.switch_head(&a_ext).unwrap();
        assert!(back_to_a.is_reorg);
        assert_eq!(back_to_a.common_ancestor, common);
        assert_eq!(
            back_to_a.diff,
            ReorgDiff {
                dropped: 6,
                added: 9
            }
        );
        assert_eq!(service.store().head(), Some(a_ext));
    }

    #[test]
    fn test_random_forks_with_null_rounds_converge_on_branch_point() {
        init_test_tracing("info");
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let mut builder = ChainBuilder::new();
            let trunk_len = rng.gen_range(0..20);
            let genesis = builder.genesis();
            let common = grow_with_gaps(&mut builder, &genesis, trunk_len, &mut rng);
            let old_len = rng.gen_range(1..25);
            let new_len = rng.gen_range(1..25);
            let old = grow_with_gaps(&mut builder, &common, old_len, &mut rng);
            let new = grow_with_gaps(&mut builder, &common, new_len, &mut rng);

            let store = builder.store();
            let mut old_iter = TipSetIterator::new(store, old.clone());
            let mut new_iter = TipSetIterator::new(store, new.clone());
            let found = find_common_ancestor(&mut old_iter, &mut new_iter).unwrap();
            assert_eq!(found, common);

            // Swapping the roles finds the same ancestor
            let mut old_iter = TipSetIterator::new(store, new.clone());
            let mut new_iter = TipSetIterator::new(store, old.clone());
            assert_eq!(
                find_common_ancestor(&mut old_iter, &mut new_iter).unwrap(),
                common
            );

            // Backward paths are strictly decreasing in height
            let heights: Vec<u64> = TipSetIterator::new(store, old)
                .map(|ts| ts.unwrap().height().unwrap())
                .collect();
            assert!(heights.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_unrelated_chains_leave_head_unchanged() {
        let mut builder = ChainBuilder::new();
        let old = builder.grow(&builder.genesis(), 5);
        let root = builder.new_root();
        let stranger = builder.grow(&root, 8);
        builder.set_head(&old);
        let service = service(builder, ReorgConfig::default());
        let exhausted_before = SEARCH_EXHAUSTED.get();

        assert_eq!(
            service.switch_head(&stranger),
            Err(ReorgError::IteratorExhausted)
        );
        assert_eq!(service.store().head(), Some(old));
        assert!(SEARCH_EXHAUSTED.get() > exhausted_before);
    }

    #[test]
    fn test_config_limits_apply_end_to_end() {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 5);
        let old = builder.grow(&common, 12);
        let new = builder.grow(&common, 13);
        builder.set_head(&old);
        let config = ReorgConfig::new()
            .with_max_lookback(20)
            .with_max_reorg_depth(10);
        let service = service(builder, config);

        // Ancestor is within lookback, but the reorg is too deep
        let eval = service.evaluate(&new).unwrap();
        assert_eq!(eval.common_ancestor, common);
        assert_eq!(
            service.switch_head(&new),
            Err(ReorgError::ReorgTooDeep {
                dropped: 12,
                limit: 10
            })
        );
    }

    #[test]
    fn test_switch_logs_search_steps_and_adopted_height() {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 4);
        let old = builder.grow(&common, 3);
        let new = builder.grow(&common, 5);
        builder.set_head(&old);
        let service = ReorgService::new(Arc::new(builder.into_store()), ReorgConfig::default());

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let eval = tracing::subscriber::with_default(subscriber, || service.switch_head(&new))
            .unwrap();
        assert!(eval.is_reorg);

        let output = logs.contents();
        assert!(output.contains("Ancestor search step"));
        assert!(output.contains("old_height=7 new_height=9"));
        assert!(output.contains("Found common ancestor"));
        assert!(output.contains("Chain reorganization"));
        assert!(output.contains("dropped=3 added=5 height=9"));
    }
}
