#![no_main]

use fence_path_editor::{attach_editor, EditorOptions, FencePayload, MemorySurface};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(payload) = FencePayload::from_json(text) else {
        return;
    };
    let Ok(ring) = payload.ring() else {
        return;
    };

    // Jeder lesbare Ring muss sich laden und (falls bearbeitbar) wieder abschließen lassen
    let mut editor = attach_editor(MemorySurface::default(), EditorOptions::default());
    if editor.enter_edit_mode(&ring, payload.anchor_metadata()) {
        if let Some(result) = editor.finish_drawing() {
            assert_eq!(result.ring.points().first(), result.ring.points().last());
        }
    }
});
