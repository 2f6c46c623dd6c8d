//! Scripted input for headless runs.
//!
//! A script is a comma-separated list of segments, each of which holds some inputs for
//! some number of ticks: `right*80,up+left*30,idle*10`. A segment without `*` lasts one
//! tick.

use core::str::FromStr;

use anyhow::Context as _;

use multicube::player::MoveIntent;

/// One word of a script segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[expect(clippy::exhaustive_enums)]
pub enum ScriptInput {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    /// No input.
    Idle,
}

impl ScriptInput {
    /// The [`MoveIntent`] holding only this input.
    pub fn intent(self) -> MoveIntent {
        let idle = MoveIntent::IDLE;
        match self {
            ScriptInput::Left => MoveIntent { left: true, ..idle },
            ScriptInput::Right => MoveIntent {
                right: true,
                ..idle
            },
            ScriptInput::Up => MoveIntent { up: true, ..idle },
            ScriptInput::Down => MoveIntent { down: true, ..idle },
            ScriptInput::Idle => idle,
        }
    }
}

/// An intent held for some number of ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct Segment {
    #[allow(missing_docs)]
    pub intent: MoveIntent,
    #[allow(missing_docs)]
    pub ticks: u32,
}

/// A parsed script. The empty string parses as the empty script.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Script {
    segments: Vec<Segment>,
}

impl Script {
    #[allow(missing_docs)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total number of ticks the script has input for.
    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// The intent for each tick, in order, followed by [`MoveIntent::IDLE`] forever.
    pub fn intents(&self) -> impl Iterator<Item = MoveIntent> + '_ {
        self.segments
            .iter()
            .flat_map(|s| core::iter::repeat_n(s.intent, s.ticks as usize))
            .chain(core::iter::repeat(MoveIntent::IDLE))
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let segments = s
            .split(',')
            .map(|text| {
                parse_segment(text.trim()).with_context(|| format!("in script segment {text:?}"))
            })
            .collect::<Result<Vec<Segment>, _>>()?;
        Ok(Self { segments })
    }
}

fn parse_segment(text: &str) -> Result<Segment, anyhow::Error> {
    let (inputs, ticks) = match text.split_once('*') {
        Some((inputs, ticks)) => (
            inputs,
            ticks
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid tick count {ticks:?}"))?,
        ),
        None => (text, 1),
    };
    let mut intent = MoveIntent::IDLE;
    for word in inputs.split('+') {
        let input = ScriptInput::from_str(word.trim()).map_err(|_| {
            anyhow::anyhow!("unknown input {word:?}; expected left, right, up, down, or idle")
        })?;
        intent = intent.union(input.intent());
    }
    Ok(Segment { intent, ticks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn right() -> MoveIntent {
        ScriptInput::Right.intent()
    }

    #[test]
    fn parse_segments() {
        let script: Script = "right*80, up+left*30,idle*10,down".parse().unwrap();
        assert_eq!(
            script.segments(),
            &[
                Segment {
                    intent: right(),
                    ticks: 80
                },
                Segment {
                    intent: MoveIntent {
                        up: true,
                        left: true,
                        ..MoveIntent::IDLE
                    },
                    ticks: 30
                },
                Segment {
                    intent: MoveIntent::IDLE,
                    ticks: 10
                },
                Segment {
                    intent: ScriptInput::Down.intent(),
                    ticks: 1
                },
            ]
        );
        assert_eq!(script.total_ticks(), 121);
    }

    #[test]
    fn empty_script() {
        let script: Script = "".parse().unwrap();
        assert_eq!(script, Script::default());
        assert!(script.intents().take(5).all(MoveIntent::is_idle));
    }

    #[test]
    fn intents_continue_idle() {
        let script: Script = "right*2,left".parse().unwrap();
        let intents: Vec<MoveIntent> = script.intents().take(5).collect();
        assert_eq!(
            intents,
            vec![
                right(),
                right(),
                ScriptInput::Left.intent(),
                MoveIntent::IDLE,
                MoveIntent::IDLE,
            ]
        );
    }

    #[test]
    fn errors() {
        let error = "right*80,jump*3".parse::<Script>().unwrap_err();
        assert_eq!(error.to_string(), "in script segment \"jump*3\"");
        assert_eq!(
            error.root_cause().to_string(),
            "unknown input \"jump\"; expected left, right, up, down, or idle"
        );

        assert!("right*many".parse::<Script>().is_err());
        assert!("right*-1".parse::<Script>().is_err());
        assert!("right,,left".parse::<Script>().is_err());
    }

    #[test]
    fn input_names() {
        assert_eq!(ScriptInput::Idle.to_string(), "idle");
        assert_eq!("up".parse::<ScriptInput>(), Ok(ScriptInput::Up));
    }
}
