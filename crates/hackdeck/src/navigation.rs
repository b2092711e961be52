use crate::deck::Deck;

/// How far `advance`/`retreat` can descend into a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// Plain slide: one stop.
    Plain,
    /// Map slide: an overview stop followed by one stop per step.
    Map { steps: usize },
}

/// Current position in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub slide: usize,
    /// Selected map step. `None` is the overview, and always the value on
    /// non-map slides.
    pub sub_step: Option<usize>,
}

impl Cursor {
    pub const START: Cursor = Cursor {
        slide: 0,
        sub_step: None,
    };

    /// Sub-step as a signed index where `-1` means overview.
    pub fn sub_step_index(&self) -> isize {
        self.sub_step.map_or(-1, |s| s as isize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What a navigation call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The sub-step changed, the slide stayed.
    SubStep { slide: usize, sub_step: Option<usize> },
    /// The slide changed and the sub-step was reset to the overview.
    Slide {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

impl Move {
    pub fn changed_slide(&self) -> bool {
        matches!(self, Move::Slide { .. })
    }
}

/// Two-level cursor over slides and map steps. The deck wraps around at both
/// ends.
#[derive(Debug, Clone)]
pub struct Navigator {
    stops: Vec<Stop>,
    cursor: Cursor,
}

impl Navigator {
    /// Panics if `stops` is empty; decks are validated non-empty on load.
    pub fn new(stops: Vec<Stop>) -> Self {
        assert!(!stops.is_empty(), "navigator needs at least one slide");
        Self {
            stops,
            cursor: Cursor::START,
        }
    }

    pub fn for_deck(deck: &Deck) -> Self {
        let stops = deck
            .slides
            .iter()
            .map(|slide| match slide.map_steps() {
                Some(steps) => Stop::Map { steps: steps.len() },
                None => Stop::Plain,
            })
            .collect();
        Self::new(stops)
    }

    /// Start on `slide` (clamped to the deck), at its overview.
    pub fn starting_at(mut self, slide: usize) -> Self {
        self.cursor = Cursor {
            slide: slide.min(self.stops.len() - 1),
            sub_step: None,
        };
        self
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn step_count(&self) -> Option<usize> {
        match self.stops[self.cursor.slide] {
            Stop::Map { steps } => Some(steps),
            Stop::Plain => None,
        }
    }

    pub fn advance(&mut self) -> Move {
        if let Some(steps) = self.step_count() {
            let next = self.cursor.sub_step.map_or(0, |s| s + 1);
            if next < steps {
                self.cursor.sub_step = Some(next);
                return Move::SubStep {
                    slide: self.cursor.slide,
                    sub_step: self.cursor.sub_step,
                };
            }
        }
        let from = self.cursor.slide;
        let to = (from + 1) % self.stops.len();
        self.move_to(from, to, Direction::Forward)
    }

    pub fn retreat(&mut self) -> Move {
        if self.step_count().is_some() {
            if let Some(current) = self.cursor.sub_step {
                self.cursor.sub_step = current.checked_sub(1);
                return Move::SubStep {
                    slide: self.cursor.slide,
                    sub_step: self.cursor.sub_step,
                };
            }
        }
        let len = self.stops.len();
        let from = self.cursor.slide;
        let to = (from + len - 1) % len;
        self.move_to(from, to, Direction::Backward)
    }

    fn move_to(&mut self, from: usize, to: usize, direction: Direction) -> Move {
        self.cursor = Cursor {
            slide: to,
            sub_step: None,
        };
        tracing::debug!(from = from + 1, to = to + 1, ?direction, "slide changed");
        Move::Slide {
            from,
            to,
            direction,
        }
    }

    /// Every distinct cursor reached by advancing once around the deck,
    /// starting from the current position.
    pub fn stops(&self) -> Vec<Cursor> {
        let mut walker = self.clone();
        let first = walker.cursor;
        let mut out = vec![first];
        loop {
            walker.advance();
            if walker.cursor == first {
                break;
            }
            out.push(walker.cursor);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(slide: usize, sub_step: isize) -> Cursor {
        Cursor {
            slide,
            sub_step: usize::try_from(sub_step).ok(),
        }
    }

    fn scenario() -> Navigator {
        Navigator::new(vec![Stop::Plain, Stop::Map { steps: 2 }, Stop::Plain])
    }

    #[rstest]
    #[case(1, 0)]
    #[case(4, 3)]
    #[case(5, 5)]
    #[case(7, 0)]
    #[case(23, 2)]
    fn advance_wraps_modulo_slide_count(#[case] len: usize, #[case] advances: usize) {
        let mut nav = Navigator::new(vec![Stop::Plain; len]);
        for _ in 0..advances {
            nav.advance();
        }
        assert_eq!(nav.cursor(), at(advances % len, -1));
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(4)]
    fn advance_then_retreat_restores_cursor(#[case] start: usize) {
        let mut nav = Navigator::new(vec![Stop::Plain; 5]).starting_at(start);
        let before = nav.cursor();
        nav.advance();
        nav.retreat();
        assert_eq!(nav.cursor(), before);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(6)]
    fn sub_steps_are_contained_in_map_slide(#[case] steps: usize) {
        let mut nav = Navigator::new(vec![Stop::Plain, Stop::Map { steps }, Stop::Plain]);
        nav.advance();
        assert_eq!(nav.cursor(), at(1, -1));

        for expected in 0..steps {
            let m = nav.advance();
            assert!(!m.changed_slide());
            assert_eq!(nav.cursor(), at(1, expected as isize));
        }
        assert!(nav.advance().changed_slide());
        assert_eq!(nav.cursor(), at(2, -1));

        // Back onto the map slide lands on its overview, then walks down.
        nav.retreat();
        assert_eq!(nav.cursor(), at(1, -1));
        nav.advance();
        for _ in 1..steps {
            nav.advance();
        }
        for expected in (-1..steps as isize - 1).rev() {
            assert!(!nav.retreat().changed_slide());
            assert_eq!(nav.cursor(), at(1, expected));
        }
        assert!(nav.retreat().changed_slide());
        assert_eq!(nav.cursor(), at(0, -1));
    }

    #[test]
    fn slide_change_resets_sub_step() {
        let mut nav = Navigator::new(vec![
            Stop::Map { steps: 2 },
            Stop::Map { steps: 3 },
            Stop::Plain,
        ]);
        for _ in 0..40 {
            if nav.advance().changed_slide() {
                assert_eq!(nav.cursor().sub_step, None);
            }
        }
        for _ in 0..40 {
            if nav.retreat().changed_slide() {
                assert_eq!(nav.cursor().sub_step, None);
            }
        }
    }

    #[test]
    fn forward_scenario() {
        let mut nav = scenario();
        assert_eq!(nav.cursor(), at(0, -1));
        let expected = [at(1, -1), at(1, 0), at(1, 1), at(2, -1), at(0, -1)];
        for cursor in expected {
            nav.advance();
            assert_eq!(nav.cursor(), cursor);
        }
    }

    #[test]
    fn backward_scenario() {
        // Entering the map slide backward lands on its overview.
        let mut nav = scenario();
        let expected = [at(2, -1), at(1, -1), at(0, -1), at(2, -1), at(1, -1)];
        for cursor in expected {
            nav.retreat();
            assert_eq!(nav.cursor(), cursor);
        }
    }

    #[test]
    fn retreat_from_map_overview_leaves_slide() {
        // Entering a map slide backward lands on the overview, so the next
        // retreat goes straight to the previous slide.
        let mut nav = scenario().starting_at(2);
        nav.retreat();
        assert_eq!(nav.cursor(), at(1, -1));
        let m = nav.retreat();
        assert_eq!(
            m,
            Move::Slide {
                from: 1,
                to: 0,
                direction: Direction::Backward
            }
        );
    }

    #[test]
    fn map_without_steps_behaves_like_plain_slide() {
        let mut nav = Navigator::new(vec![Stop::Plain, Stop::Map { steps: 0 }]);
        nav.advance();
        assert_eq!(nav.cursor(), at(1, -1));
        assert!(nav.advance().changed_slide());
        assert_eq!(nav.cursor(), at(0, -1));
    }

    #[test]
    fn single_slide_deck_wraps_onto_itself() {
        let mut nav = Navigator::new(vec![Stop::Plain]);
        assert_eq!(
            nav.advance(),
            Move::Slide {
                from: 0,
                to: 0,
                direction: Direction::Forward
            }
        );
        assert_eq!(nav.cursor(), Cursor::START);
    }

    #[test]
    fn starting_at_clamps_to_last_slide() {
        let nav = Navigator::new(vec![Stop::Plain; 3]).starting_at(99);
        assert_eq!(nav.cursor(), at(2, -1));
    }

    #[test]
    fn stops_cover_slides_and_sub_steps() {
        let stops = scenario().stops();
        assert_eq!(
            stops,
            vec![at(0, -1), at(1, -1), at(1, 0), at(1, 1), at(2, -1)]
        );
    }

    #[test]
    fn sub_step_index_uses_minus_one_for_overview() {
        assert_eq!(at(3, -1).sub_step_index(), -1);
        assert_eq!(at(3, 2).sub_step_index(), 2);
    }

    #[test]
    fn builtin_deck_stop_count() {
        let deck = Deck::builtin().unwrap();
        let nav = Navigator::for_deck(&deck);
        // Every slide once, plus 3 + 2 + 3 map steps.
        assert_eq!(nav.stops().len(), 21 + 8);
    }
}
