//! Keyboard focus hand-off between the tab strip and the active pane
//!
//! Focus is in one of three places: outside the control, on the strip
//! (left/right change tabs), or inside the active pane (the pane's own
//! traversal moves between its children until it runs off an edge).

use super::layout::TabPosition;
use crate::ui::core::Key;

/// Where keyboard focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusMode {
    #[default]
    Outside,
    /// Left/right keys switch tabs
    ChangingTabs,
    /// A child of the active pane has focus
    InsideContent,
}

/// Inputs of the focus state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    FocusIn,
    Key(Key),
    /// Action/confirm key
    Action,
    /// The pane's own traversal ran past its first or last child
    BoundaryReached,
}

/// What the controller has to do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEffect {
    None,
    /// Activate the next (`forward`) or previous enabled tab
    ChangeTab { forward: bool },
    /// Focus the first (`forward`) or last traversable child of the active
    /// pane
    EnterContent { forward: bool },
    /// Take focus back onto the strip
    ReclaimStrip,
    /// Give focus up to the parent
    ReleaseFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusStateMachine {
    mode: FocusMode,
}

impl FocusStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    /// Apply one event. Pairs not listed below leave the mode unchanged.
    ///
    /// | from          | event                | to             |
    /// |---------------|----------------------|----------------|
    /// | Outside       | FocusIn              | ChangingTabs   |
    /// | ChangingTabs  | Left / Right         | ChangingTabs   |
    /// | ChangingTabs  | key toward the panes | InsideContent  |
    /// | InsideContent | BoundaryReached      | ChangingTabs   |
    /// | ChangingTabs  | Action               | Outside        |
    pub fn handle(&mut self, event: FocusEvent, position: TabPosition) -> FocusEffect {
        use FocusEvent as E;
        use FocusMode as M;

        let (next, effect) = match (self.mode, event) {
            (M::Outside, E::FocusIn) => (M::ChangingTabs, FocusEffect::None),
            (M::ChangingTabs, E::Key(key @ (Key::Left | Key::Right))) => (
                M::ChangingTabs,
                FocusEffect::ChangeTab {
                    forward: key == Key::Right,
                },
            ),
            (M::ChangingTabs, E::Key(key)) if key == into_content_key(position) => (
                M::InsideContent,
                FocusEffect::EnterContent {
                    forward: key == Key::Down,
                },
            ),
            (M::InsideContent, E::BoundaryReached) => (M::ChangingTabs, FocusEffect::ReclaimStrip),
            (M::ChangingTabs, E::Action) => (M::Outside, FocusEffect::ReleaseFocus),
            (mode, _) => (mode, FocusEffect::None),
        };
        self.mode = next;
        effect
    }

    /// The active pane had nothing to focus: stay on the strip
    pub fn abort_enter(&mut self) {
        if self.mode == FocusMode::InsideContent {
            self.mode = FocusMode::ChangingTabs;
        }
    }

    /// Focus left the control by other means (pointer, host)
    pub fn reset(&mut self) {
        self.mode = FocusMode::Outside;
    }
}

/// Vertical key that moves from the strip into the panes
pub fn into_content_key(position: TabPosition) -> Key {
    match position {
        TabPosition::Top => Key::Down,
        TabPosition::Bottom => Key::Up,
    }
}

/// Next enabled tab after `from`, scanning circularly.
///
/// `None` starts the scan before tab 0 (forward) or after the last tab
/// (backward). When every tab is disabled `from` is returned unchanged
/// (tab 0 when there is none).
pub fn next_enabled(from: Option<usize>, forward: bool, disabled: &[bool]) -> usize {
    let count = disabled.len();
    let fallback = from.unwrap_or(0);
    if count == 0 || disabled.iter().all(|&d| d) {
        return fallback;
    }

    let mut i = from;
    for _ in 0..count {
        let next = match (i, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        if !disabled[next] {
            return next;
        }
        i = Some(next);
    }
    fallback
}

/// Where a directional key should send focus when the parent window does
/// geographic (spatial) navigation and the strip has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoRoute {
    /// Let the parent move focus to a neighbouring control
    Leave,
    /// Move into the active pane
    EnterContent,
    /// The strip handles the key itself (changes tab)
    Stay,
}

pub fn geographic_route(key: Key, position: TabPosition, active: usize, count: usize) -> GeoRoute {
    if key.is_vertical() {
        return if key == into_content_key(position) {
            GeoRoute::EnterContent
        } else {
            GeoRoute::Leave
        };
    }
    let at_end = match key {
        Key::Right => active + 1 >= count,
        _ => active == 0,
    };
    if at_end { GeoRoute::Leave } else { GeoRoute::Stay }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: [FocusEvent; 7] = [
        FocusEvent::FocusIn,
        FocusEvent::Key(Key::Left),
        FocusEvent::Key(Key::Right),
        FocusEvent::Key(Key::Up),
        FocusEvent::Key(Key::Down),
        FocusEvent::Action,
        FocusEvent::BoundaryReached,
    ];

    fn machine_in(mode: FocusMode) -> FocusStateMachine {
        FocusStateMachine { mode }
    }

    #[test]
    fn test_outside_only_accepts_focus_in() {
        for position in [TabPosition::Top, TabPosition::Bottom] {
            for event in EVENTS {
                let mut fsm = FocusStateMachine::new();
                let effect = fsm.handle(event, position);
                let expected = if event == FocusEvent::FocusIn {
                    FocusMode::ChangingTabs
                } else {
                    FocusMode::Outside
                };
                assert_eq!(fsm.mode(), expected, "event {:?}", event);
                assert_eq!(effect, FocusEffect::None);
            }
        }
    }

    #[test]
    fn test_full_transition_matrix_top() {
        use FocusEffect as F;
        use FocusMode as M;

        let cases: [(M, FocusEvent, M, F); 21] = [
            (M::Outside, EVENTS[0], M::ChangingTabs, F::None),
            (M::Outside, EVENTS[1], M::Outside, F::None),
            (M::Outside, EVENTS[2], M::Outside, F::None),
            (M::Outside, EVENTS[3], M::Outside, F::None),
            (M::Outside, EVENTS[4], M::Outside, F::None),
            (M::Outside, EVENTS[5], M::Outside, F::None),
            (M::Outside, EVENTS[6], M::Outside, F::None),
            (M::ChangingTabs, EVENTS[0], M::ChangingTabs, F::None),
            (M::ChangingTabs, EVENTS[1], M::ChangingTabs, F::ChangeTab { forward: false }),
            (M::ChangingTabs, EVENTS[2], M::ChangingTabs, F::ChangeTab { forward: true }),
            (M::ChangingTabs, EVENTS[3], M::ChangingTabs, F::None),
            (M::ChangingTabs, EVENTS[4], M::InsideContent, F::EnterContent { forward: true }),
            (M::ChangingTabs, EVENTS[5], M::Outside, F::ReleaseFocus),
            (M::ChangingTabs, EVENTS[6], M::ChangingTabs, F::None),
            (M::InsideContent, EVENTS[0], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[1], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[2], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[3], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[4], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[5], M::InsideContent, F::None),
            (M::InsideContent, EVENTS[6], M::ChangingTabs, F::ReclaimStrip),
        ];

        for (from, event, to, effect) in cases {
            let mut fsm = machine_in(from);
            assert_eq!(fsm.handle(event, TabPosition::Top), effect, "{:?} + {:?}", from, event);
            assert_eq!(fsm.mode(), to, "{:?} + {:?}", from, event);
        }
    }

    #[test]
    fn test_bottom_tabs_enter_content_upward() {
        let mut fsm = machine_in(FocusMode::ChangingTabs);
        assert_eq!(fsm.handle(FocusEvent::Key(Key::Down), TabPosition::Bottom), FocusEffect::None);
        assert_eq!(fsm.mode(), FocusMode::ChangingTabs);

        assert_eq!(
            fsm.handle(FocusEvent::Key(Key::Up), TabPosition::Bottom),
            FocusEffect::EnterContent { forward: false }
        );
        assert_eq!(fsm.mode(), FocusMode::InsideContent);
    }

    #[test]
    fn test_abort_enter_returns_to_strip() {
        let mut fsm = machine_in(FocusMode::ChangingTabs);
        fsm.handle(FocusEvent::Key(Key::Down), TabPosition::Top);
        fsm.abort_enter();
        assert_eq!(fsm.mode(), FocusMode::ChangingTabs);

        let mut outside = FocusStateMachine::new();
        outside.abort_enter();
        assert_eq!(outside.mode(), FocusMode::Outside);
    }

    #[test]
    fn test_next_enabled_wraps_and_skips() {
        let disabled = [false, true, false, false];
        assert_eq!(next_enabled(Some(0), true, &disabled), 2);
        assert_eq!(next_enabled(Some(3), true, &disabled), 0);
        assert_eq!(next_enabled(Some(2), false, &disabled), 0);
        assert_eq!(next_enabled(Some(0), false, &disabled), 3);
        assert_eq!(next_enabled(None, true, &disabled), 0);
        assert_eq!(next_enabled(None, false, &disabled), 3);
    }

    #[test]
    fn test_next_enabled_never_returns_disabled() {
        let patterns: [[bool; 4]; 5] = [
            [false, false, false, false],
            [true, false, true, false],
            [true, true, true, false],
            [false, true, true, true],
            [true, true, false, true],
        ];
        for disabled in patterns {
            for from in 0..4 {
                for forward in [true, false] {
                    let next = next_enabled(Some(from), forward, &disabled);
                    assert!(!disabled[next], "{:?} from {} fwd {}", disabled, from, forward);
                }
            }
        }
    }

    #[test]
    fn test_next_enabled_all_disabled_keeps_position() {
        let disabled = [true; 3];
        for from in 0..3 {
            assert_eq!(next_enabled(Some(from), true, &disabled), from);
            assert_eq!(next_enabled(Some(from), false, &disabled), from);
        }
        assert_eq!(next_enabled(None, true, &disabled), 0);
    }

    #[test]
    fn test_geographic_route() {
        use TabPosition::{Bottom, Top};
        assert_eq!(geographic_route(Key::Down, Top, 1, 3), GeoRoute::EnterContent);
        assert_eq!(geographic_route(Key::Up, Top, 1, 3), GeoRoute::Leave);
        assert_eq!(geographic_route(Key::Up, Bottom, 1, 3), GeoRoute::EnterContent);
        assert_eq!(geographic_route(Key::Right, Top, 2, 3), GeoRoute::Leave);
        assert_eq!(geographic_route(Key::Left, Top, 0, 3), GeoRoute::Leave);
        assert_eq!(geographic_route(Key::Right, Top, 1, 3), GeoRoute::Stay);
    }
}
