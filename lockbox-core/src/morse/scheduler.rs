//! Tick-driven Morse scheduler
//!
//! Owns the encoder and the timing table. Call [`SequenceScheduler::tick`]
//! periodically with the current time; when the current phase has lasted
//! long enough, exactly one transition runs.

use crate::config::MorseTiming;
use crate::traits::DutyCycleOutput;

use super::encoder::{GapKind, MorseEncoder, Phase};
use super::message::MorseCommand;

/// Non-blocking Morse sequence player
#[derive(Debug)]
pub struct SequenceScheduler<'a> {
    encoder: MorseEncoder<'a>,
    timing: MorseTiming,
    /// Time of the last phase change (ms)
    last_transition_ms: u64,
}

impl<'a> SequenceScheduler<'a> {
    pub const fn new(timing: MorseTiming, on_duty: u32) -> Self {
        Self {
            encoder: MorseEncoder::new(on_duty),
            timing,
            last_transition_ms: 0,
        }
    }

    /// Start playing `pattern` at `now_ms`
    pub fn start<O>(&mut self, pattern: &'a str, now_ms: u64, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        self.encoder.start(pattern, out);
        self.last_transition_ms = now_ms;
    }

    /// Silence the output immediately
    pub fn stop<O>(&mut self, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        self.encoder.stop(out);
    }

    /// Apply a command from the lock logic
    pub fn apply<O>(&mut self, command: MorseCommand, now_ms: u64, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        match command {
            MorseCommand::Send(message) => self.start(message.pattern(), now_ms, out),
            MorseCommand::Stop => self.stop(out),
        }
    }

    /// Advance the sequence if the current phase has run its course
    ///
    /// Returns the new phase when a transition ran. A `now_ms` earlier than
    /// the last transition counts as zero elapsed, so repeated calls without
    /// progress change nothing.
    pub fn tick<O>(&mut self, now_ms: u64, out: &mut O) -> Option<Phase>
    where
        O: DutyCycleOutput + ?Sized,
    {
        let threshold = self.threshold()?;
        let elapsed = now_ms.saturating_sub(self.last_transition_ms);
        if elapsed < threshold {
            return None;
        }

        self.encoder.advance(out);
        self.last_transition_ms = now_ms;
        Some(self.encoder.phase())
    }

    /// Duration of the current phase (ms), `None` when nothing is playing
    pub fn threshold(&self) -> Option<u64> {
        match self.encoder.phase() {
            Phase::Dot => Some(self.timing.dot_ms),
            Phase::Dash => Some(self.timing.dash_ms),
            Phase::Gap => Some(match self.encoder.gap_kind() {
                Some(GapKind::Letter) => self.timing.letter_gap(),
                Some(GapKind::Word) => self.timing.word_gap(),
                _ => self.timing.element_gap_ms,
            }),
            Phase::Idle | Phase::End => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.encoder.phase()
    }

    pub fn is_active(&self) -> bool {
        self.encoder.is_active()
    }

    pub fn timing(&self) -> &MorseTiming {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DASH_DURATION_MS, DOT_DURATION_MS, ELEMENT_GAP_MS, LETTER_GAP_MS, WORD_GAP_MS,
    };
    use crate::morse::message::{Message, SOS_PATTERN};
    use crate::morse::testing::RecordingOutput;
    use heapless::Vec;

    const ON: u32 = 800;

    fn scheduler() -> SequenceScheduler<'static> {
        SequenceScheduler::new(MorseTiming::DEFAULT, ON)
    }

    /// Tick every `step` ms until the sequence ends, logging each on/off
    /// change as (time, on)
    fn run(
        sched: &mut SequenceScheduler<'static>,
        out: &mut RecordingOutput,
        start: u64,
        step: u64,
    ) -> Vec<(u64, bool), 64> {
        let mut log = Vec::new();
        let mut now = start;
        let mut was_on = out.is_on();
        log.push((now, was_on)).unwrap();

        while sched.is_active() {
            now += step;
            sched.tick(now, out);
            if out.is_on() != was_on {
                was_on = out.is_on();
                log.push((now, was_on)).unwrap();
            }
            assert!(now < start + 60_000, "sequence never ended");
        }
        log
    }

    #[test]
    fn test_three_dots() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.start("...", 0, &mut out);

        let log = run(&mut sched, &mut out, 0, 10);
        let d = DOT_DURATION_MS;
        let g = ELEMENT_GAP_MS;
        assert_eq!(
            log.as_slice(),
            &[
                (0, true),
                (d, false),
                (d + g, true),
                (2 * d + g, false),
                (2 * d + 2 * g, true),
                (3 * d + 2 * g, false),
            ]
        );
        assert_eq!(sched.phase(), Phase::End);
    }

    #[test]
    fn test_dash_holds_until_threshold() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.start("-", 1000, &mut out);

        assert_eq!(sched.tick(1000 + DASH_DURATION_MS - 1, &mut out), None);
        assert_eq!(sched.phase(), Phase::Dash);
        assert!(out.is_on());

        assert_eq!(sched.tick(1000 + DASH_DURATION_MS, &mut out), Some(Phase::Gap));
        assert!(!out.is_on());
    }

    #[test]
    fn test_stop_in_every_phase() {
        // (pattern, time to tick to before stopping, expected phase)
        let cases = [
            (".", 0, Phase::Dot),
            ("-", 0, Phase::Dash),
            (".", DOT_DURATION_MS, Phase::Gap),
        ];

        for (pattern, at, phase) in cases {
            let mut out = RecordingOutput::new(1000);
            let mut sched = scheduler();
            sched.start(pattern, 0, &mut out);
            sched.tick(at, &mut out);
            assert_eq!(sched.phase(), phase);

            sched.stop(&mut out);
            assert_eq!(sched.phase(), Phase::End);
            assert!(!out.is_on());

            // Nothing left to schedule
            assert_eq!(sched.tick(at + 100_000, &mut out), None);
        }
    }

    #[test]
    fn test_sos_sequence() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.apply(MorseCommand::Send(Message::Sos), 0, &mut out);

        let log = run(&mut sched, &mut out, 0, 10);

        // Pair up on/off edges into pulse lengths
        let mut pulses: Vec<u64, 16> = Vec::new();
        for pair in log.chunks(2) {
            if let [(on_at, true), (off_at, false)] = pair {
                pulses.push(off_at - on_at).unwrap();
            }
        }

        let d = DOT_DURATION_MS;
        let a = DASH_DURATION_MS;
        assert_eq!(pulses.as_slice(), &[d, d, d, a, a, a, d, d, d]);

        // Every gap between pulses is one element gap
        for pair in log[1..].chunks(2) {
            if let [(off_at, false), (on_at, true)] = pair {
                assert_eq!(on_at - off_at, ELEMENT_GAP_MS);
            }
        }

        assert_eq!(SOS_PATTERN.len(), 9);
        assert_eq!(sched.phase(), Phase::End);
        // 9 on writes + 9 off writes
        assert_eq!(out.writes.len(), 18);
    }

    #[test]
    fn test_separator_adds_element_gap() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.start(". .", 0, &mut out);

        let log = run(&mut sched, &mut out, 0, 10);
        let d = DOT_DURATION_MS;
        let g = ELEMENT_GAP_MS;
        assert_eq!(log[2], (d + 2 * g, true));
    }

    #[test]
    fn test_distinct_gaps() {
        let timing = MorseTiming {
            distinct_gaps: true,
            ..MorseTiming::DEFAULT
        };
        let mut out = RecordingOutput::new(1000);
        let mut sched = SequenceScheduler::new(timing, ON);
        sched.start(". / .", 0, &mut out);

        let log = run(&mut sched, &mut out, 0, 10);
        let expected = DOT_DURATION_MS + ELEMENT_GAP_MS + 2 * LETTER_GAP_MS + WORD_GAP_MS;
        assert_eq!(log[2], (expected, true));
    }

    #[test]
    fn test_open_pattern_plays_to_end() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.apply(MorseCommand::Send(Message::Open), 0, &mut out);

        run(&mut sched, &mut out, 0, 50);
        assert_eq!(sched.phase(), Phase::End);
        // O P E N = 3 + 4 + 1 + 2 symbols, one on and one off write each
        assert_eq!(out.writes.len(), 2 * 10);
    }

    #[test]
    fn test_tick_idempotent() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.start(".", 500, &mut out);

        for _ in 0..5 {
            assert_eq!(sched.tick(500 + DOT_DURATION_MS - 1, &mut out), None);
        }
        // Time going backwards counts as zero elapsed
        assert_eq!(sched.tick(0, &mut out), None);
        assert_eq!(sched.phase(), Phase::Dot);
        assert_eq!(out.writes.len(), 1);
    }

    #[test]
    fn test_one_transition_per_tick() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.start("..", 0, &mut out);

        // Far past every threshold, still a single step
        assert_eq!(sched.tick(100_000, &mut out), Some(Phase::Gap));
        assert_eq!(sched.tick(100_000, &mut out), None);
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();

        assert_eq!(sched.threshold(), None);
        assert_eq!(sched.tick(10_000, &mut out), None);
        assert!(out.writes.is_empty());
    }

    #[test]
    fn test_stop_command() {
        let mut out = RecordingOutput::new(1000);
        let mut sched = scheduler();
        sched.apply(MorseCommand::Send(Message::Close), 0, &mut out);
        assert!(sched.is_active());

        sched.apply(MorseCommand::Stop, 10, &mut out);
        assert!(!sched.is_active());
        assert_eq!(out.duty, 0);
    }
}
