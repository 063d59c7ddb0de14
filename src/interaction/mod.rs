use serde::{Deserialize, Serialize};

/// Hit-test result a chart hands to its tooltip state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Index of the hit element in the chart's series.
    pub index: usize,
    /// Pixel anchor the tooltip box is positioned against.
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub label: String,
    pub value: f64,
}

/// Two-state tooltip machine owned by a single chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum TooltipState {
    #[default]
    Idle,
    Showing(Tooltip),
}

impl TooltipState {
    #[must_use]
    pub fn is_showing(&self) -> bool {
        matches!(self, Self::Showing(_))
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        match self {
            Self::Idle => None,
            Self::Showing(tooltip) => Some(tooltip),
        }
    }
}

/// Pointer-driven state for one chart surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    tooltip: TooltipState,
}

impl InteractionState {
    /// Last surface-relative pointer position while the pointer is inside.
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn tooltip_state(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.tooltip()
    }

    /// Records the pointer and replaces the tooltip with `hit`.
    ///
    /// A miss returns the state to `Idle`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, hit: Option<Tooltip>) {
        self.cursor = Some((x, y));
        self.tooltip = match hit {
            Some(tooltip) => TooltipState::Showing(tooltip),
            None => TooltipState::Idle,
        };
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.tooltip = TooltipState::Idle;
    }
}

/// Converts client (window) coordinates into coordinates relative to a
/// drawing surface whose top-left corner sits at `(origin_x, origin_y)`.
#[must_use]
pub fn surface_relative(client_x: f64, client_y: f64, origin_x: f64, origin_y: f64) -> (f64, f64) {
    (client_x - origin_x, client_y - origin_y)
}

#[cfg(test)]
mod tests {
    use super::{InteractionState, Tooltip, TooltipState, surface_relative};

    fn tooltip() -> Tooltip {
        Tooltip {
            index: 1,
            anchor_x: 120.0,
            anchor_y: 80.0,
            label: "Jan 8".to_owned(),
            value: 42.0,
        }
    }

    #[test]
    fn move_then_leave_returns_to_idle() {
        let mut state = InteractionState::default();
        state.on_pointer_move(118.0, 60.0, Some(tooltip()));
        assert!(state.tooltip_state().is_showing());
        assert_eq!(state.cursor(), Some((118.0, 60.0)));

        state.on_pointer_leave();
        assert_eq!(state.tooltip_state(), &TooltipState::Idle);
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn miss_clears_previous_tooltip() {
        let mut state = InteractionState::default();
        state.on_pointer_move(118.0, 60.0, Some(tooltip()));
        state.on_pointer_move(5.0, 5.0, None);
        assert!(state.tooltip().is_none());
    }

    #[test]
    fn client_coordinates_shift_by_surface_origin() {
        assert_eq!(surface_relative(150.0, 90.0, 100.0, 40.0), (50.0, 50.0));
    }
}
