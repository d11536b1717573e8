//! # Integration Tests
//!
//! Cross-crate end-to-end tests:
//! - parser → runner pipelines against temp directories
//! - engine-level completion, isolation, and reuse scenarios
//! - the progress-table guarantees the display relies on

#[cfg(test)]
mod engine_tests {
    use progress_engine::{RunCoordinator, POLL_INTERVAL};

    /// The canonical lockstep scenario: N=3 workers, S=2 stages, each worker
    /// reports 0.5 then 1.0 per stage. After the third worker's final hard
    /// update, completion is observable within one poll interval and every
    /// slot reads [1.0, 1.0].
    #[tokio::test]
    async fn test_three_workers_two_stages_complete_in_lockstep() {
        let (mut coordinator, links) = RunCoordinator::new(3, 2);

        let mut workers = Vec::new();
        for mut link in links {
            workers.push(tokio::spawn(async move {
                link.arrive().await;
                tokio::task::spawn_blocking(move || {
                    use contracts::ProgressSink;
                    for stage in 0..2 {
                        let mut reporter = link.stage_reporter(stage);
                        reporter.report(0.5);
                        reporter.report(1.0);
                    }
                })
                .await
                .unwrap();
            }));
        }

        coordinator.rendezvous().await;

        // Poll like the runner does; bounded only by the test harness.
        let mut polls = 0u32;
        while !coordinator.is_complete() {
            coordinator.drain();
            tokio::time::sleep(POLL_INTERVAL).await;
            polls += 1;
            assert!(polls < 500, "run did not complete");
        }

        for worker in workers {
            worker.await.unwrap();
        }
        assert_eq!(coordinator.table().snapshot(), vec![vec![1.0, 1.0]; 3]);
        assert_eq!(coordinator.table().finished_workers(), 3);
    }

    /// Worker A's updates never leak into worker B's slot.
    #[tokio::test]
    async fn test_worker_slots_are_isolated() {
        let (mut coordinator, links) = RunCoordinator::new(2, 3);
        let busy = links.into_iter().next().unwrap();

        tokio::task::spawn_blocking(move || {
            use contracts::ProgressSink;
            let mut reporter = busy.stage_reporter(0);
            reporter.report(0.3);
            reporter.report(0.6);
            reporter.report(1.0);
        })
        .await
        .unwrap();

        coordinator.drain();
        let table = coordinator.table();
        assert_eq!(table.slots()[0].current_stage(), 1);
        assert_eq!(table.slots()[1].current_stage(), 0);
        assert_eq!(table.slots()[1].stages(), &[0.0, 0.0, 0.0]);
    }

    /// A second run with a larger worker count sees only fresh zeroed slots.
    #[tokio::test]
    async fn test_rerun_with_larger_worker_count_has_no_residue() {
        let (mut first, links) = RunCoordinator::new(2, 2);
        for link in links {
            tokio::task::spawn_blocking(move || {
                use contracts::ProgressSink;
                for stage in 0..2 {
                    link.stage_reporter(stage).report(1.0);
                }
            })
            .await
            .unwrap();
        }
        first.drain();
        assert!(first.is_complete());
        drop(first);

        let (second, _links) = RunCoordinator::new(5, 2);
        assert_eq!(second.table().worker_count(), 5);
        assert_eq!(second.table().snapshot(), vec![vec![0.0, 0.0]; 5]);
        assert_eq!(second.table().finished_workers(), 0);
    }
}

#[cfg(test)]
mod pipeline_tests {
    use command_parser::{parse, Command, ParserOptions};
    use progress_engine::ProgressTable;
    use runner::{NullView, ProgressView};

    fn parsed(line: &str) -> contracts::PipelineSpec {
        match parse(line, &ParserOptions::default()) {
            Ok(Command::Pipeline(spec)) => spec,
            other => panic!("expected pipeline from '{line}', got {other:?}"),
        }
    }

    /// View asserting the slot-count invariant on every poll.
    struct SlotCountCheck {
        expected: usize,
        polls: usize,
    }

    impl ProgressView for SlotCountCheck {
        fn render(&mut self, table: &ProgressTable) {
            assert_eq!(table.worker_count(), self.expected);
            self.polls += 1;
        }
    }

    /// Full flow: parse a pipeline, run it, check the report and outputs.
    #[tokio::test]
    async fn test_parse_then_run_generate_chain() {
        let dir = tempfile::tempdir().unwrap();
        let line = format!(
            "generate 3 64 64 | blur 2 2 | gamma 0.8 | output {}/img.png",
            dir.path().display()
        );

        let spec = parsed(&line);
        let mut view = SlotCountCheck {
            expected: 3,
            polls: 0,
        };
        let report = runner::run_pipeline(spec, &mut view).await.unwrap();

        assert_eq!(report.workers, 3);
        assert_eq!(report.stages, 4);
        assert_eq!(report.stages_completed, 12);
        assert!(view.polls > 0);
        for worker in 0..3 {
            assert!(dir.path().join(format!("img_{worker}.png")).exists());
        }
    }

    /// An input-led pipeline fans out one worker per path and round-trips
    /// the pixels through the processing chain.
    #[tokio::test]
    async fn test_input_pipeline_runs_one_worker_per_path() {
        let dir = tempfile::tempdir().unwrap();

        // Seed two source images with a generate run.
        let seed = format!("generate 2 32 32 | output {}/src.png", dir.path().display());
        runner::run_pipeline(parsed(&seed), &mut NullView)
            .await
            .unwrap();

        let line = format!(
            "input {d}/src_0.png {d}/src_1.png | colorcor 0.1 0.0 0.0 | output {d}/out.png",
            d = dir.path().display()
        );
        let report = runner::run_pipeline(parsed(&line), &mut NullView)
            .await
            .unwrap();

        assert_eq!(report.workers, 2);
        assert!(dir.path().join("out_0.png").exists());
        assert!(dir.path().join("out_1.png").exists());
    }

    /// Every generator kind drives a full run to completion.
    #[tokio::test]
    async fn test_noise_generators_run_to_completion() {
        for lead in [
            "noisy 2 5 32 32",
            "wosy 2 5 32 32",
            "dirsey 2 5 32 32",
        ] {
            let line = format!("{lead} | randcir 3 0.2 | room 0.1 0.1 0.9 0.9");
            let report = runner::run_pipeline(parsed(&line), &mut NullView)
                .await
                .unwrap();
            assert_eq!(report.workers, 2, "pipeline '{line}'");
            assert_eq!(report.stages_completed, 6, "pipeline '{line}'");
        }
    }

    /// Parse errors and run errors are values, so the caller (the shell)
    /// survives them and keeps accepting commands.
    #[tokio::test]
    async fn test_errors_are_run_scoped() {
        assert!(parse("blur 1 1", &ParserOptions::default()).is_err());

        let spec = contracts::PipelineSpec::new(vec![contracts::StageSpec::Blur {
            radius_x: 1,
            radius_y: 1,
        }]);
        let err = runner::run_pipeline(spec, &mut NullView).await.unwrap_err();
        assert!(matches!(
            err,
            contracts::PipelineError::InvalidLeadingStage { .. }
        ));
    }
}
