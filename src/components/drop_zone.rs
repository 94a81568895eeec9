//! Drop Zone Component
//!
//! A horizontal line between rows; highlighted while the pointer is over
//! its slot during a drag.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use uuid::Uuid;

#[component]
pub fn DropZone(dnd: DndSignals<Uuid>, slot: usize) -> impl IntoView {
    let is_active = move || dnd.drop_target_read.get().is_some_and(|t| t.slot == slot);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !dnd.is_active() { c.push_str(" hidden"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    // Attribute name matches leptos_dragdrop::SLOT_ATTR
    view! { <div class=zone_class data-drop-slot=slot.to_string() /> }
}
