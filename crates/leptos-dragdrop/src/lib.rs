//! Leptos DragDrop Utilities
//!
//! Drag-and-drop reordering for flat Leptos lists.
//! Mouse: a movement threshold distinguishes click from drag.
//! Touch: a long press picks the row up, then the finger drags it.
//!
//! Drop positions are hit-tested from the pointer coordinates. Rows carry
//! [`ROW_ATTR`] with their display index, drop zones between rows carry
//! [`SLOT_ATTR`] with the slot index they stand for.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attribute on drop zones: the slot index the zone represents
pub const SLOT_ATTR: &str = "data-drop-slot";
/// Attribute on rows: the row's display index
pub const ROW_ATTR: &str = "data-drop-row";

/// Movement threshold in pixels to start a mouse drag
const DRAG_THRESHOLD_PX: i32 = 5;
/// How long a finger must rest on a row before it is picked up
const LONG_PRESS_MS: i32 = 450;
/// Finger movement that turns a pending press into a scroll
const TOUCH_SLOP_PX: i32 = 10;

/// Anything usable as a row identity
pub trait DragKey: Copy + PartialEq + Send + Sync + 'static {}
impl<T: Copy + PartialEq + Send + Sync + 'static> DragKey for T {}

/// Insert position in the display sequence; slot 0 is before the first row,
/// slot N after the last of N rows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub slot: usize,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<K: DragKey> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// True briefly after a drop, so the trailing click can be ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row (pressed but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Bumped on every press and cancel; a long-press timer only fires for
    /// the press that scheduled it
    press_token_read: ReadSignal<u32>,
    press_token_write: WriteSignal<u32>,
}

pub fn create_dnd_signals<K: DragKey>() -> DndSignals<K> {
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (press_token_read, press_token_write) = signal(0u32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        press_token_read,
        press_token_write,
    }
}

impl<K: DragKey> DndSignals<K> {
    /// Whether `id` is the row being dragged (tracked)
    pub fn is_dragging(&self, id: K) -> bool {
        self.dragging_id_read.get() == Some(id)
    }

    /// Whether any drag is in progress (tracked)
    pub fn is_active(&self) -> bool {
        self.dragging_id_read.get().is_some()
    }

    fn begin_press(&self, id: K, x: i32, y: i32) -> u32 {
        let token = self.press_token_read.get_untracked().wrapping_add(1);
        self.press_token_write.set(token);
        self.pending_id_write.set(Some(id));
        self.start_x_write.set(x);
        self.start_y_write.set(y);
        token
    }

    fn cancel_press(&self) {
        self.press_token_write.set(self.press_token_read.get_untracked().wrapping_add(1));
        self.pending_id_write.set(None);
    }

    fn moved_beyond(&self, x: i32, y: i32, threshold: i32) -> bool {
        let dx = (x - self.start_x_read.get_untracked()).abs();
        let dy = (y - self.start_y_read.get_untracked()).abs();
        dx > threshold || dy > threshold
    }
}

/// End drag operation
pub fn end_drag<K: DragKey>(dnd: &DndSignals<K>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.cancel_press();
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    after_ms(100, move || {
        if !clear.is_disposed() {
            clear.set(false);
        }
    });
}

/// Index the moved row ends up at once it is taken out of position `from`
/// and put into `slot`
pub fn resolve_slot(from: usize, slot: usize) -> usize {
    if slot > from {
        slot - 1
    } else {
        slot
    }
}

/// Slot under a viewport point: a drop zone's own slot, or the nearer edge
/// of the row under the point
pub fn slot_at_point(x: i32, y: i32) -> Option<usize> {
    let doc = web_sys::window()?.document()?;
    let hit = doc.element_from_point(x as f32, y as f32)?;

    if let Some(zone) = hit.closest(&format!("[{}]", SLOT_ATTR)).ok().flatten() {
        return zone.get_attribute(SLOT_ATTR)?.parse().ok();
    }

    let row = hit.closest(&format!("[{}]", ROW_ATTR)).ok().flatten()?;
    let index: usize = row.get_attribute(ROW_ATTR)?.parse().ok()?;
    let rect = row.get_bounding_client_rect();
    let middle = rect.top() + rect.height() / 2.0;
    Some(if f64::from(y) < middle { index } else { index + 1 })
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown<K: DragKey>(dnd: DndSignals<K>, id: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || starts_on_control(ev.target()) {
            return;
        }
        dnd.begin_press(id, ev.client_x(), ev.client_y());
    }
}

/// Create touchstart handler for draggable rows
/// Picks the row up if the finger stays put for the long-press delay
pub fn make_on_touchstart<K: DragKey>(dnd: DndSignals<K>, id: K) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if starts_on_control(ev.target()) {
            return;
        }
        let Some(touch) = ev.touches().get(0) else { return };
        let token = dnd.begin_press(id, touch.client_x(), touch.client_y());

        after_ms(LONG_PRESS_MS, move || {
            if disposed(&dnd) {
                return;
            }
            let still_pressed = dnd.press_token_read.get_untracked() == token
                && dnd.pending_id_read.get_untracked() == Some(id);
            if still_pressed && dnd.dragging_id_read.get_untracked().is_none() {
                dnd.drop_target_write.set(None);
                dnd.dragging_id_write.set(Some(id));
            }
        });
    }
}

/// Bind document-level move, release and cancel handlers for mouse and touch.
///
/// `on_drop` receives the dragged id and where it was released. The listeners
/// live as long as the page, so call this once per `dnd` from a long-lived
/// owner. Once the signals are disposed every listener is a no-op.
pub fn bind_global_drop<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: DragKey,
    F: Fn(K, DropTarget) + Clone + 'static,
{
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        handle_mouse_move(&dnd, ev.client_x(), ev.client_y());
    });

    let drop_mouse = on_drop.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        finish(&dnd, &drop_mouse);
    });

    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        let Some(touch) = ev.touches().get(0) else { return };
        if handle_touch_move(&dnd, touch.client_x(), touch.client_y()) {
            // Keep the page from scrolling under the dragged row
            ev.prevent_default();
        }
    });

    let drop_touch = on_drop;
    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        finish(&dnd, &drop_touch);
    });

    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        handle_cancel(&dnd);
    });

    let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());

    // touchmove must not be passive, or prevent_default is ignored
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = doc.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        on_touchmove.as_ref().unchecked_ref(),
        &options,
    );
    let _ = doc.add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("touchcancel", on_touchcancel.as_ref().unchecked_ref());

    on_mousemove.forget();
    on_mouseup.forget();
    on_touchmove.forget();
    on_touchend.forget();
    on_touchcancel.forget();
}

/// Signals whose owner is gone; listeners must not touch them
fn disposed<K: DragKey>(dnd: &DndSignals<K>) -> bool {
    dnd.dragging_id_read.is_disposed()
}

fn handle_mouse_move<K: DragKey>(dnd: &DndSignals<K>, x: i32, y: i32) {
    if disposed(dnd) {
        return;
    }
    if dnd.dragging_id_read.get_untracked().is_some() {
        update_target(dnd, x, y);
    } else if let Some(pending) = dnd.pending_id_read.get_untracked() {
        if dnd.moved_beyond(x, y, DRAG_THRESHOLD_PX) {
            dnd.dragging_id_write.set(Some(pending));
            update_target(dnd, x, y);
        }
    }
}

/// Returns true while a row is being dragged
fn handle_touch_move<K: DragKey>(dnd: &DndSignals<K>, x: i32, y: i32) -> bool {
    if disposed(dnd) {
        return false;
    }
    if dnd.dragging_id_read.get_untracked().is_some() {
        update_target(dnd, x, y);
        return true;
    }
    if dnd.pending_id_read.get_untracked().is_some() && dnd.moved_beyond(x, y, TOUCH_SLOP_PX) {
        dnd.cancel_press();
    }
    false
}

fn handle_cancel<K: DragKey>(dnd: &DndSignals<K>) {
    if disposed(dnd) {
        return;
    }
    if dnd.dragging_id_read.get_untracked().is_some() {
        end_drag(dnd);
    } else {
        dnd.cancel_press();
    }
}

fn update_target<K: DragKey>(dnd: &DndSignals<K>, x: i32, y: i32) {
    let target = slot_at_point(x, y).map(|slot| DropTarget { slot });
    if dnd.drop_target_read.get_untracked() != target {
        dnd.drop_target_write.set(target);
    }
}

fn finish<K: DragKey, F: Fn(K, DropTarget)>(dnd: &DndSignals<K>, on_drop: &F) {
    if disposed(dnd) {
        return;
    }
    let dragging = dnd.dragging_id_read.get_untracked();
    let target = dnd.drop_target_read.get_untracked();

    match (dragging, target) {
        (Some(dragged), Some(target)) => {
            end_drag(dnd);
            on_drop(dragged, target);
        }
        (Some(_), None) => end_drag(dnd),
        // Plain click or tap; the click event fires normally
        (None, _) => dnd.cancel_press(),
    }
}

/// Presses on inputs and buttons inside a row keep their normal behaviour
fn starts_on_control(target: Option<web_sys::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || t.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
    })
}

fn after_ms(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(win) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}
