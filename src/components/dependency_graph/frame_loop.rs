use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;

/// Source of animation frames. Each `request` runs `tick` once, later.
pub trait FrameScheduler {
	/// Returns a handle for [`FrameScheduler::cancel`], or `None` when no
	/// frame could be requested.
	fn request(&self, tick: &Rc<dyn Fn()>) -> Option<i32>;
	fn cancel(&self, handle: i32);
	/// Free anything held for the tick callback.
	fn release(&self) {}
}

/// Browser `requestAnimationFrame`.
#[derive(Default)]
pub struct AnimationFrames {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler for AnimationFrames {
	fn request(&self, tick: &Rc<dyn Fn()>) -> Option<i32> {
		let Some(window) = web_sys::window() else {
			warn!("no window; layout animation disabled");
			return None;
		};
		let mut slot = self.callback.borrow_mut();
		let callback = slot.get_or_insert_with(|| {
			let tick = Rc::clone(tick);
			Closure::new(move || tick())
		});
		match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
			Ok(handle) => Some(handle),
			Err(err) => {
				warn!("requestAnimationFrame failed: {err:?}");
				None
			}
		}
	}

	fn cancel(&self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}

	fn release(&self) {
		self.callback.borrow_mut().take();
	}
}

struct Inner<S> {
	scheduler: S,
	on_frame: RefCell<Option<Box<dyn FnMut() -> bool>>>,
	tick: OnceCell<Rc<dyn Fn()>>,
	pending: Cell<Option<i32>>,
	stopped: Cell<bool>,
}

impl<S: FrameScheduler> Inner<S> {
	fn run(&self) {
		self.pending.set(None);
		if self.stopped.get() {
			return;
		}
		let again = match self.on_frame.try_borrow_mut() {
			Ok(mut on_frame) => on_frame.as_mut().is_some_and(|on_frame| on_frame()),
			Err(_) => false,
		};
		if again && !self.stopped.get() {
			self.schedule();
		}
	}

	fn schedule(&self) {
		let Some(tick) = self.tick.get() else {
			return;
		};
		if let Some(handle) = self.scheduler.request(tick) {
			self.pending.set(Some(handle));
		}
	}
}

/// Frame driver that keeps scheduling itself while `on_frame` returns `true`,
/// and can be woken again after it goes idle.
///
/// Stopping (or dropping) cancels the pending frame and frees the callback,
/// so nothing runs after teardown.
pub struct FrameLoop<S: FrameScheduler = AnimationFrames> {
	inner: Rc<Inner<S>>,
}

impl FrameLoop {
	pub fn new(on_frame: impl FnMut() -> bool + 'static) -> Self {
		Self::with_scheduler(AnimationFrames::default(), on_frame)
	}
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
	pub fn with_scheduler(scheduler: S, on_frame: impl FnMut() -> bool + 'static) -> Self {
		let inner = Rc::new(Inner {
			scheduler,
			on_frame: RefCell::new(Some(Box::new(on_frame))),
			tick: OnceCell::new(),
			pending: Cell::new(None),
			stopped: Cell::new(false),
		});

		let weak: Weak<Inner<S>> = Rc::downgrade(&inner);
		let tick: Rc<dyn Fn()> = Rc::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.run();
			}
		});
		let _ = inner.tick.set(tick);

		Self { inner }
	}
}

impl<S: FrameScheduler> FrameLoop<S> {
	/// Request a frame unless one is already pending or the loop is stopped.
	pub fn wake(&self) {
		if self.inner.stopped.get() || self.inner.pending.get().is_some() {
			return;
		}
		self.inner.schedule();
	}

	pub fn stop(&self) {
		self.inner.stopped.set(true);
		if let Some(handle) = self.inner.pending.take() {
			self.inner.scheduler.cancel(handle);
		}
		if let Ok(mut on_frame) = self.inner.on_frame.try_borrow_mut() {
			on_frame.take();
		}
		self.inner.scheduler.release();
	}
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Frames {
		queued: RefCell<Vec<(i32, Rc<dyn Fn()>)>>,
		requested: RefCell<Vec<Rc<dyn Fn()>>>,
		cancelled: RefCell<Vec<i32>>,
		next: Cell<i32>,
	}

	/// Scheduler whose frames only run when the test asks for one.
	#[derive(Clone, Default)]
	struct ManualFrames(Rc<Frames>);

	impl ManualFrames {
		/// Run the oldest queued frame; `false` when nothing was queued.
		fn run_frame(&self) -> bool {
			let next = {
				let mut queued = self.0.queued.borrow_mut();
				(!queued.is_empty()).then(|| queued.remove(0))
			};
			match next {
				Some((_, tick)) => {
					tick();
					true
				}
				None => false,
			}
		}

		fn run_all(&self) -> usize {
			let mut frames = 0;
			while self.run_frame() {
				frames += 1;
			}
			frames
		}

		fn requests(&self) -> usize {
			self.0.requested.borrow().len()
		}

		fn last_requested(&self) -> Rc<dyn Fn()> {
			Rc::clone(self.0.requested.borrow().last().unwrap())
		}
	}

	impl FrameScheduler for ManualFrames {
		fn request(&self, tick: &Rc<dyn Fn()>) -> Option<i32> {
			let handle = self.0.next.get() + 1;
			self.0.next.set(handle);
			self.0.queued.borrow_mut().push((handle, Rc::clone(tick)));
			self.0.requested.borrow_mut().push(Rc::clone(tick));
			Some(handle)
		}

		fn cancel(&self, handle: i32) {
			self.0.queued.borrow_mut().retain(|(queued, _)| *queued != handle);
			self.0.cancelled.borrow_mut().push(handle);
		}
	}

	fn counting(frames: &ManualFrames, limit: usize) -> (FrameLoop<ManualFrames>, Rc<Cell<usize>>) {
		let calls = Rc::new(Cell::new(0));
		let seen = Rc::clone(&calls);
		let frame_loop = FrameLoop::with_scheduler(frames.clone(), move || {
			seen.set(seen.get() + 1);
			seen.get() < limit
		});
		(frame_loop, calls)
	}

	#[test]
	fn runs_until_the_callback_goes_idle() {
		let frames = ManualFrames::default();
		let (frame_loop, calls) = counting(&frames, 3);
		assert_eq!(frames.run_all(), 0);

		frame_loop.wake();
		assert_eq!(frames.run_all(), 3);
		assert_eq!(calls.get(), 3);

		// Idle until woken, e.g. by a drag.
		frame_loop.wake();
		frames.run_all();
		assert_eq!(calls.get(), 4);
	}

	#[test]
	fn wake_while_pending_requests_one_frame() {
		let frames = ManualFrames::default();
		let (frame_loop, _calls) = counting(&frames, 10);
		frame_loop.wake();
		frame_loop.wake();
		assert_eq!(frames.requests(), 1);
	}

	#[test]
	fn stop_cancels_the_pending_frame() {
		let frames = ManualFrames::default();
		let (frame_loop, calls) = counting(&frames, 10);
		frame_loop.wake();
		frames.run_frame();
		assert_eq!(calls.get(), 1);

		frame_loop.stop();
		assert_eq!(frames.0.cancelled.borrow().as_slice(), &[2]);
		assert!(!frames.run_frame());
		assert_eq!(calls.get(), 1);

		frame_loop.wake();
		assert_eq!(frames.requests(), 2);
		assert_eq!(frames.run_all(), 0);
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn frame_firing_after_stop_is_ignored() {
		let frames = ManualFrames::default();
		let (frame_loop, calls) = counting(&frames, 10);
		frame_loop.wake();
		frame_loop.stop();

		// A callback the browser had already dequeued still fires once.
		frames.last_requested()();
		assert_eq!(calls.get(), 0);
		assert_eq!(frames.requests(), 1);
	}

	#[test]
	fn dropping_the_loop_stops_it_and_frees_the_callback() {
		let frames = ManualFrames::default();
		let marker = Rc::new(());
		let held = Rc::clone(&marker);
		let calls = Rc::new(Cell::new(0));
		let seen = Rc::clone(&calls);
		let frame_loop = FrameLoop::with_scheduler(frames.clone(), move || {
			let _ = &held;
			seen.set(seen.get() + 1);
			true
		});
		frame_loop.wake();
		assert_eq!(Rc::strong_count(&marker), 2);

		drop(frame_loop);
		assert_eq!(Rc::strong_count(&marker), 1);
		assert_eq!(frames.run_all(), 0);
		frames.last_requested()();
		assert_eq!(calls.get(), 0);
	}

	#[test]
	fn replacing_a_loop_leaves_only_the_new_one_ticking() {
		let frames = ManualFrames::default();
		let mut slot = None;
		let (old, old_calls) = counting(&frames, 100);
		old.wake();
		slot.replace(old);

		let (new, new_calls) = counting(&frames, 100);
		slot.take();
		new.wake();
		slot.replace(new);

		for _ in 0..5 {
			frames.run_frame();
		}
		assert_eq!(old_calls.get(), 0);
		assert_eq!(new_calls.get(), 5);
	}
}
