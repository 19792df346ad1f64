use crate::models::Marker;

pub(crate) const MAP_WIDTH: f64 = 720.0;
pub(crate) const MAP_HEIGHT: f64 = 360.0;

/// Equirectangular projection onto the `MAP_WIDTH` × `MAP_HEIGHT` canvas.
pub(crate) fn project(lat: f64, lng: f64) -> (f64, f64) {
    let x = (lng + 180.0) / 360.0 * MAP_WIDTH;
    let y = (90.0 - lat) / 180.0 * MAP_HEIGHT;
    (x, y)
}

/// Inverse of [`project`], clamped to valid coordinates.
pub(crate) fn unproject(x: f64, y: f64) -> (f64, f64) {
    let lng = x / MAP_WIDTH * 360.0 - 180.0;
    let lat = 90.0 - y / MAP_HEIGHT * 180.0;
    (lat.clamp(-90.0, 90.0), lng.clamp(-180.0, 180.0))
}

pub(crate) fn landmarks() -> Vec<Marker> {
    vec![
        Marker::landmark(39.329858, -76.620540, "Johns Hopkins University", "I go to school here."),
        Marker::landmark(32.003407, 118.734956, "Nanjing", "This is where I was born."),
        Marker::landmark(
            37.423829,
            -122.092154,
            "Google",
            "This is where my internship was supposed to be, but now it's remote.",
        ),
        Marker::landmark(
            23.117487,
            -82.373375,
            "Havana",
            "I went there with my friends. It was great fun.",
        ),
        Marker::landmark(38.642805, -90.195679, "St Louis", "I worked here during summer, 2019."),
    ]
}

/// Markers on the gallery map plus the single editable marker, if any.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MapState {
    markers: Vec<Marker>,
    editing: Option<(f64, f64)>,
    selected: Option<usize>,
}

impl MapState {
    pub fn with_landmarks() -> Self {
        Self {
            markers: landmarks(),
            editing: None,
            selected: None,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn editing(&self) -> Option<(f64, f64)> {
        self.editing
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.selected.and_then(|i| self.markers.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn add_markers(&mut self, markers: impl IntoIterator<Item = Marker>) {
        self.markers.extend(markers);
    }

    /// Clicking a marker opens its info panel; clicking it again closes it.
    pub fn toggle_selected(&mut self, index: usize) {
        if index >= self.markers.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Places the editable marker, replacing any previous one.
    pub fn start_edit(&mut self, lat: f64, lng: f64) {
        self.editing = Some((lat, lng));
        self.selected = None;
    }

    pub fn discard_edit(&mut self) {
        self.editing = None;
    }

    /// Turns the editable marker into a display marker and returns it for saving.
    pub fn commit_edit(&mut self, content: &str) -> Option<Marker> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let (lat, lng) = self.editing.take()?;
        let marker = Marker::new(lat, lng, content);
        self.markers.push(marker.clone());
        Some(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_corners() {
        assert_eq!(project(90.0, -180.0), (0.0, 0.0));
        assert_eq!(project(-90.0, 180.0), (MAP_WIDTH, MAP_HEIGHT));
        assert_eq!(project(0.0, 0.0), (MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0));
    }

    #[test]
    fn unproject_inverts_project() {
        for m in landmarks() {
            let (x, y) = project(m.lat, m.lng);
            let (lat, lng) = unproject(x, y);
            assert!((lat - m.lat).abs() < 1e-9);
            assert!((lng - m.lng).abs() < 1e-9);
        }
    }

    #[test]
    fn unproject_clamps_outside_canvas() {
        assert_eq!(unproject(-10.0, -10.0), (90.0, -180.0));
    }

    #[test]
    fn landmarks_are_flagged() {
        let marks = landmarks();
        assert_eq!(marks.len(), 5);
        assert!(marks.iter().all(|m| m.landmark && m.title.is_some()));
    }

    #[test]
    fn only_one_editable_marker() {
        let mut map = MapState::with_landmarks();
        map.start_edit(1.0, 2.0);
        map.start_edit(3.0, 4.0);
        assert_eq!(map.editing(), Some((3.0, 4.0)));

        map.discard_edit();
        assert_eq!(map.editing(), None);
    }

    #[test]
    fn commit_turns_edit_into_display_marker() {
        let mut map = MapState::with_landmarks();
        map.start_edit(10.0, 20.0);

        assert_eq!(map.commit_edit("   "), None);
        assert_eq!(map.editing(), Some((10.0, 20.0)));

        let saved = map.commit_edit(" coffee here ").expect("marker");
        assert_eq!(saved, Marker::new(10.0, 20.0, "coffee here"));
        assert_eq!(map.editing(), None);
        assert_eq!(map.markers().len(), 6);
        assert!(!map.markers()[5].landmark);
    }

    #[test]
    fn commit_without_edit_is_none() {
        let mut map = MapState::with_landmarks();
        assert_eq!(map.commit_edit("text"), None);
    }

    #[test]
    fn selection_toggles() {
        let mut map = MapState::with_landmarks();
        map.toggle_selected(1);
        assert_eq!(map.selected().map(|m| m.title.as_deref()), Some(Some("Nanjing")));
        map.toggle_selected(1);
        assert!(map.selected().is_none());
        map.toggle_selected(99);
        assert!(map.selected().is_none());
    }

    #[test]
    fn fetched_markers_are_appended() {
        let mut map = MapState::with_landmarks();
        map.add_markers(vec![Marker::new(0.0, 0.0, "a"), Marker::new(1.0, 1.0, "b")]);
        assert_eq!(map.markers().len(), 7);
    }
}
