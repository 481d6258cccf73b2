//! Tick loop: one input line in, one output line out
//!
//! Records are handled strictly one at a time. End of input is a normal
//! shutdown.

use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::game::systems::ai::TankAi;
use crate::metrics::Metrics;
use crate::net::framing::{read_line, write_line, FramingError};
use crate::net::protocol::{decode_snapshot, encode_actions, DecodeError, EncodeError};

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Drives the decision engine over a line stream
pub struct BotSession {
    ai: TankAi,
    metrics: Arc<Metrics>,
    strict_input: bool,
    max_line_bytes: usize,
}

impl BotSession {
    pub fn new(config: &BotConfig, metrics: Arc<Metrics>) -> Self {
        Self::with_engine(TankAi::new(config.seed), config, metrics)
    }

    pub fn with_engine(ai: TankAi, config: &BotConfig, metrics: Arc<Metrics>) -> Self {
        Self {
            ai,
            metrics,
            strict_input: config.strict_input,
            max_line_bytes: config.max_line_bytes,
        }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Decode one record, decide every friend, encode the reply
    pub fn handle_line(&mut self, line: &str) -> Result<String, SessionError> {
        let snapshot = decode_snapshot(line)?;

        let started = Instant::now();
        let actions = self.ai.think_actions(&snapshot);
        self.metrics.record_tick_time(started.elapsed());
        self.metrics.record_actions(&actions);

        debug!(
            "Tick decided: friends={} (alive {}), enemies={} (alive {})",
            snapshot.friends.len(),
            snapshot.alive_friends(),
            snapshot.enemies.len(),
            snapshot.alive_enemies()
        );

        Ok(encode_actions(&actions)?)
    }

    /// Run until the reader is exhausted.
    ///
    /// A malformed record ends the session with an error, after every
    /// earlier reply has been written. With strict input turned off it is
    /// skipped with a warning and produces no output line instead. IO errors
    /// always end the session.
    pub async fn run<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<(), SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let line = match read_line(reader, self.max_line_bytes).await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(FramingError::Io(e)) => return Err(FramingError::Io(e).into()),
                Err(e) => {
                    self.reject(SessionError::Framing(e))?;
                    continue;
                }
            };

            match self.handle_line(&line) {
                Ok(reply) => write_line(writer, &reply).await?,
                Err(e @ SessionError::Decode(_)) => self.reject(e)?,
                Err(e) => return Err(e),
            }
        }

        debug!("Input stream closed");
        Ok(())
    }

    fn reject(&self, error: SessionError) -> Result<(), SessionError> {
        self.metrics.record_malformed();
        if self.strict_input {
            return Err(error);
        }
        warn!("Skipping malformed record: {}", error);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    const FRIEND_SHOOTER: &str = r#"{"center":[0,0],"direction":0,"velocity":[0,0],"hp":10,"can-shoot-after":0,"name":"shooter"}"#;
    const FRIEND_DEAD: &str = r#"{"center":[0,0],"direction":0,"velocity":[0,0],"hp":0,"can-shoot-after":0,"name":"dead"}"#;
    const FRIEND_SLOW: &str = r#"{"center":[0,0],"direction":0,"velocity":[1,1],"hp":10,"can-shoot-after":5,"name":"slow"}"#;
    const ENEMY: &str = r#"{"center":[50,0],"direction":0,"velocity":[0,0],"hp":3,"can-shoot-after":0,"name":"enemy"}"#;

    fn create_session(seed: u64, strict: bool) -> BotSession {
        let config = BotConfig {
            seed: Some(seed),
            strict_input: strict,
            ..Default::default()
        };
        BotSession::new(&config, Arc::new(Metrics::new()))
    }

    fn tick(friends: &[&str], enemies: &[&str]) -> String {
        format!("[[{}],[{}]]", friends.join(","), enemies.join(","))
    }

    async fn run_session(session: &mut BotSession, input: &str) -> (Result<(), SessionError>, String) {
        let mut reader = input.as_bytes();
        let mut output: Vec<u8> = Vec::new();
        let result = session.run(&mut reader, &mut output).await;
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_handle_line() {
        let mut session = create_session(1, false);
        let reply = session
            .handle_line(&tick(&[FRIEND_SHOOTER, FRIEND_DEAD], &[ENEMY]))
            .unwrap();

        assert_eq!(reply, r#"[{"function":"shoot","parameter":10.0},null]"#);
        assert_eq!(session.metrics().shoot_actions.load(Ordering::Relaxed), 1);
        assert_eq!(session.metrics().idle_tanks.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_one_output_line_per_tick() {
        let mut session = create_session(1, false);
        let line = tick(&[FRIEND_SHOOTER, FRIEND_DEAD, FRIEND_SLOW], &[ENEMY]);
        let input = format!("{line}\n{line}\n{line}\n");

        let (result, output) = run_session(&mut session, &input).await;

        assert!(result.is_ok());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let actions: Vec<Option<serde_json::Value>> = serde_json::from_str(line).unwrap();
            assert_eq!(actions.len(), 3);
            assert!(actions[1].is_none());
        }
        assert_eq!(session.metrics().tick_count.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn test_empty_input_is_clean_shutdown() {
        let mut session = create_session(1, true);
        let (result, output) = run_session(&mut session, "").await;
        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_skipped() {
        let mut session = create_session(1, false);
        let good = tick(&[FRIEND_SHOOTER], &[ENEMY]);
        let input = format!("{good}\n{{broken\n[[{{\"center\":[1]}}],[]]\n{good}\n");

        let (result, output) = run_session(&mut session, &input).await;

        assert!(result.is_ok());
        assert_eq!(output.lines().count(), 2);
        assert_eq!(session.metrics().malformed_records.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_malformed_record_strict() {
        let mut session = create_session(1, true);
        let good = tick(&[FRIEND_SHOOTER], &[ENEMY]);
        let input = format!("{good}\nnot json\n{good}\n");

        let (result, output) = run_session(&mut session, &input).await;

        assert!(matches!(result, Err(SessionError::Decode(_))));
        assert_eq!(output.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_record_fatal_by_default() {
        let config = BotConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut session = BotSession::new(&config, Arc::new(Metrics::new()));
        let good = tick(&[FRIEND_SHOOTER], &[ENEMY]);
        let input = format!("{good}\n\n{{bad\n{good}\n");

        let (result, output) = run_session(&mut session, &input).await;

        // Reply to the good tick is out before the blank line stops the loop
        assert!(matches!(result, Err(SessionError::Decode(_))));
        assert_eq!(output, "[{\"function\":\"shoot\",\"parameter\":10.0}]\n");
        assert_eq!(session.metrics().malformed_records.load(Ordering::Relaxed), 1);
        assert_eq!(session.metrics().tick_count.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_oversized_line_fatal_by_default() {
        let config = BotConfig {
            seed: Some(1),
            max_line_bytes: 16,
            ..Default::default()
        };
        let mut session = BotSession::new(&config, Arc::new(Metrics::new()));
        let input = format!("{}\n[[],[]]\n", tick(&[FRIEND_SHOOTER], &[ENEMY]));

        let (result, output) = run_session(&mut session, &input).await;

        assert!(matches!(
            result,
            Err(SessionError::Framing(FramingError::LineTooLong(_, 16)))
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_line_skipped() {
        let config = BotConfig {
            seed: Some(1),
            strict_input: false,
            max_line_bytes: 16,
            ..Default::default()
        };
        let mut session = BotSession::new(&config, Arc::new(Metrics::new()));
        let input = format!("{}\n[[],[]]\n", tick(&[FRIEND_SHOOTER], &[ENEMY]));

        let (result, output) = run_session(&mut session, &input).await;

        assert!(result.is_ok());
        assert_eq!(output, "[]\n");
    }

    #[tokio::test]
    async fn test_same_seed_same_output() {
        let line = tick(&[FRIEND_SLOW, FRIEND_SLOW, FRIEND_DEAD], &[ENEMY]);
        let input = std::iter::repeat(line).take(25).collect::<Vec<_>>().join("\n");

        let (_, first) = run_session(&mut create_session(77, false), &input).await;
        let (_, second) = run_session(&mut create_session(77, false), &input).await;

        assert_eq!(first.lines().count(), 25);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_no_diagnostics_on_output() {
        let mut session = create_session(3, false);
        let input = tick(&[FRIEND_SLOW], &[]);

        let (_, output) = run_session(&mut session, &input).await;

        assert!(output.starts_with("[{\"function\":"));
        assert!(!output.contains("speed"));
    }
}
