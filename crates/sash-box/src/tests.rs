#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::settings::{load_settings_from, save_settings_to};
    use crate::{SashBox, SashSettings, Scenario};
    use sash_core::{
        Axis, Cursor, DocumentHost, InputEvent, MouseButton, PointerKind, Rect, SashDescriptor,
        Size, Vec2,
    };
    use sash_input::{Document, SharedDocument, SplitterSettings};

    fn sash_box(
        container: Rect,
        descs: &[SashDescriptor],
    ) -> (Rc<RefCell<Document>>, SashBox) {
        let doc = Document::shared();
        let shared: SharedDocument = doc.clone();
        let mut sash_box =
            SashBox::new(Axis::Row, descs, shared, SplitterSettings::default()).unwrap();
        sash_box.set_container(container);
        (doc, sash_box)
    }

    fn down(x: f32) -> InputEvent {
        InputEvent::PointerDown {
            position: Vec2::new(x, 10.0),
            pointer: PointerKind::Mouse(MouseButton::Left),
            time_ms: 0,
        }
    }

    fn move_to(x: f32) -> InputEvent {
        InputEvent::PointerMove {
            position: Vec2::new(x, 10.0),
        }
    }

    fn up(x: f32) -> InputEvent {
        InputEvent::PointerUp {
            position: Vec2::new(x, 10.0),
        }
    }

    fn widths(sash_box: &SashBox) -> Vec<f32> {
        sash_box.compute().into_iter().map(|(_, r)| r.width).collect()
    }

    fn three_panes() -> (Rc<RefCell<Document>>, SashBox) {
        sash_box(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &[
                SashDescriptor::new("200px"),
                SashDescriptor::new("1"),
                SashDescriptor::new("200px"),
            ],
        )
    }

    // ── Gestures ────────────────────────────────

    #[test]
    fn drag_first_splitter_reports_final_sizes() {
        let (doc, mut sash_box) = three_panes();
        assert_eq!(widths(&sash_box), vec![200.0, 400.0, 200.0]);

        assert_eq!(sash_box.handle(down(200.0)).unwrap(), None);
        assert_eq!(sash_box.active_splitter(), Some(0));
        assert_eq!(doc.borrow().cursor(), Cursor::ColResize);

        assert_eq!(sash_box.handle(move_to(250.0)).unwrap(), None);
        assert!(sash_box.layout().is_sashing());
        assert_eq!(widths(&sash_box), vec![250.0, 350.0, 200.0]);

        let map = sash_box.handle(up(250.0)).unwrap().unwrap();
        assert_eq!(map.get(0), Some(250.0));
        assert_eq!(map.get(1), Some(350.0));
        assert_eq!(map.get(2), Some(200.0));

        assert_eq!(sash_box.active_splitter(), None);
        assert!(!sash_box.layout().is_sashing());
        assert_eq!(doc.borrow().cursor(), Cursor::Default);
        assert_eq!(doc.borrow().listener_count(), 0);
    }

    #[test]
    fn click_on_splitter_emits_nothing() {
        let (_doc, mut sash_box) = three_panes();
        sash_box.handle(down(600.0)).unwrap();
        assert_eq!(sash_box.handle(up(600.0)).unwrap(), None);
        assert!(!sash_box.layout().is_sashing());
    }

    #[test]
    fn pointer_down_off_splitter_is_ignored() {
        let (doc, mut sash_box) = three_panes();
        sash_box.handle(down(400.0)).unwrap();
        assert_eq!(sash_box.active_splitter(), None);
        assert_eq!(doc.borrow().listener_count(), 0);
    }

    #[test]
    fn overshoot_waits_for_pointer_to_return() {
        let descs = [
            SashDescriptor::new(1.0).with_min_size("50px"),
            SashDescriptor::new(1.0).with_min_size("50px"),
        ];
        let (_doc, mut sash_box) = sash_box(Rect::new(0.0, 0.0, 200.0, 100.0), &descs);

        sash_box.handle(down(100.0)).unwrap();
        sash_box.handle(move_to(190.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![150.0, 50.0]);

        // Still right of the clamped splitter: no shrink yet.
        sash_box.handle(move_to(180.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![150.0, 50.0]);

        sash_box.handle(move_to(140.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![110.0, 90.0]);
    }

    #[test]
    fn overshoot_left_waits_too() {
        let descs = [
            SashDescriptor::new(1.0).with_min_size("50px"),
            SashDescriptor::new(1.0).with_min_size("50px"),
        ];
        let (_doc, mut sash_box) = sash_box(Rect::new(0.0, 0.0, 200.0, 100.0), &descs);

        sash_box.handle(down(100.0)).unwrap();
        sash_box.handle(move_to(10.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![50.0, 150.0]);

        sash_box.handle(move_to(30.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![50.0, 150.0]);

        sash_box.handle(move_to(70.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![90.0, 110.0]);
    }

    #[test]
    fn double_click_resets_pair() {
        let (_doc, mut sash_box) = sash_box(
            Rect::new(0.0, 0.0, 160.0, 100.0),
            &[
                SashDescriptor::new(3.0).with_key("a"),
                SashDescriptor::new(1.0).with_key("b"),
            ],
        );
        let map = sash_box
            .handle(InputEvent::DoubleClick {
                position: Vec2::new(120.0, 10.0),
            })
            .unwrap()
            .unwrap();
        assert_eq!(map.get("a"), Some(80.0));
        assert_eq!(map.get("b"), Some(80.0));
        assert_eq!(widths(&sash_box), vec![80.0, 80.0]);
    }

    #[test]
    fn second_splitter_ignored_while_dragging() {
        let (doc, mut sash_box) = three_panes();
        sash_box.handle(down(200.0)).unwrap();
        sash_box.handle(down(600.0)).unwrap();
        assert_eq!(sash_box.active_splitter(), Some(0));
        assert_eq!(doc.borrow().listener_count(), 1);

        sash_box.handle(move_to(180.0)).unwrap();
        assert_eq!(widths(&sash_box), vec![180.0, 420.0, 200.0]);
    }

    #[test]
    fn container_resize_mid_session_keeps_pinned_sizes() {
        let (_doc, mut sash_box) = three_panes();
        sash_box.handle(down(200.0)).unwrap();
        sash_box.handle(move_to(220.0)).unwrap();
        sash_box
            .handle(InputEvent::Resize {
                size: Size::new(1000.0, 600.0),
            })
            .unwrap();
        let map = sash_box.handle(up(220.0)).unwrap().unwrap();
        assert_eq!(map.get(0), Some(220.0));
        assert_eq!(map.get(1), Some(380.0));

        // Unpinned, the proportional pane takes up the new space.
        assert_eq!(widths(&sash_box), vec![220.0, 580.0, 200.0]);
    }

    #[test]
    fn reconfiguring_mid_drag_releases_document() {
        let (doc, mut sash_box) = three_panes();
        sash_box.handle(down(200.0)).unwrap();
        sash_box.handle(move_to(230.0)).unwrap();

        sash_box
            .set_sashes(&[SashDescriptor::new(1.0), SashDescriptor::new(1.0)])
            .unwrap();
        assert_eq!(sash_box.active_splitter(), None);
        assert_eq!(doc.borrow().listener_count(), 0);
        assert_eq!(doc.borrow().cursor(), Cursor::Default);
        assert_eq!(widths(&sash_box), vec![400.0, 400.0]);
    }

    #[test]
    fn dropping_box_mid_drag_releases_document() {
        let (doc, mut sash_box) = three_panes();
        sash_box.handle(down(200.0)).unwrap();
        sash_box.handle(move_to(210.0)).unwrap();
        drop(sash_box);
        assert_eq!(doc.borrow().listener_count(), 0);
        assert_eq!(doc.borrow().cursor(), Cursor::Default);
    }

    #[test]
    fn hiding_pane_rebuilds_splitters() {
        let (_doc, mut sash_box) = three_panes();
        assert_eq!(sash_box.dividers().len(), 2);
        sash_box.set_visible(2, false).unwrap();
        assert_eq!(sash_box.dividers().len(), 1);
    }

    // ── Scenario and settings ───────────────────

    #[test]
    fn scenario_replays_drag() {
        let json = r#"{
            "direction": "row",
            "container": {"width": 800, "height": 600},
            "sashes": [{"size": "200px"}, {"size": "1"}, {"size": "200px"}],
            "events": [
                {"type": "pointer_down", "position": {"x": 200, "y": 10}},
                {"type": "pointer_move", "position": {"x": 250, "y": 10}},
                {"type": "pointer_up", "position": {"x": 250, "y": 10}}
            ]
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        let maps = scenario.run(SplitterSettings::default()).unwrap();
        assert_eq!(maps.len(), 1);
        assert_eq!(
            serde_json::to_string(&maps[0]).unwrap(),
            r#"{"0":250.0,"1":350.0,"2":200.0}"#
        );
    }

    #[test]
    fn scenario_reports_invalid_weight() {
        let json = r#"{"container": {"width": 100, "height": 100}, "sashes": [{"size": 0.5}]}"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert!(scenario.run(SplitterSettings::default()).is_err());
    }

    #[test]
    fn settings_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = SashSettings::default();
        settings.splitter.double_tap_ms = 450;
        save_settings_to(&settings, &path);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn broken_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), SashSettings::default());
        assert_eq!(
            load_settings_from(&dir.path().join("missing.json")),
            SashSettings::default()
        );
    }
}
