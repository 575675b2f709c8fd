//! # Access Coordinator
//!
//! Admission control for rotations (writers) and snapshots (readers).
//!
//! ```text
//!                        ┌──────────── Monitor ─────────────┐
//!   rotate(Top, 0) ──┐   │  Mutex<State>                    │
//!   rotate(Top, 2) ──┼──>│    active / waiting counts       │──> WriteAccess (axis, plane)
//!   rotate(Left,1) ──┘   │    current axis, occupied planes │
//!                        │    per-(axis, plane) FIFO queues │
//!   show()         ─────>│  Condvar per axis + readers      │──> ReadAccess
//!                        └──────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Writers run together only when they share an axis and hold distinct
//!   planes. Readers run together, never alongside a writer.
//! - A departing group picks its successor: writers hand over to waiting
//!   readers first, readers to waiting writers first, and writer axes are
//!   scanned round-robin starting after the axis that just finished.
//! - The thread that releases admits waiters on their behalf. A woken waiter
//!   only checks that its ticket was granted, so a cancellation that races
//!   with admission always loses and the operation runs.
//! - While anyone else is queued, a running writer group stops pulling in new
//!   same-axis writers and drains.
//!
//! No grid access or hook ever runs under the lock.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use concube_shared::{Axis, GeometryError, Plane, RotationRequest, AXIS_COUNT};
use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace};

use super::cancel::CancelToken;
use crate::error::{CubeError, CubeResult};

/// Identifies one waiting caller.
pub(crate) type Ticket = u64;

/// Condition variable a waiter sleeps on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WaitQueue {
    Writers(Axis),
    Readers,
}

/// Which side a freshly idle coordinator serves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Readers,
    Writers,
}

/// How a wait ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Granted,
    Cancelled,
    TimedOut,
}

#[derive(Debug)]
struct Wakers {
    writers: [Condvar; AXIS_COUNT],
    readers: Condvar,
}

impl Wakers {
    fn new() -> Self {
        Self {
            writers: [Condvar::new(), Condvar::new(), Condvar::new()],
            readers: Condvar::new(),
        }
    }

    fn condvar(&self, queue: WaitQueue) -> &Condvar {
        match queue {
            WaitQueue::Writers(axis) => &self.writers[axis.index()],
            WaitQueue::Readers => &self.readers,
        }
    }
}

/// Lock plus condition variables, shared with [`CancelToken`]s.
#[derive(Debug)]
pub(crate) struct Monitor {
    state: Mutex<State>,
    wakers: Wakers,
}

impl Monitor {
    /// Wakes everyone sleeping on `queue`.
    ///
    /// Taking the lock first guarantees that a waiter which checked its
    /// cancel flag before the flag was set is already asleep.
    pub(crate) fn wake(&self, queue: WaitQueue) {
        drop(self.state.lock());
        self.wakers.condvar(queue).notify_all();
    }
}

#[derive(Debug)]
struct State {
    size: usize,
    active_readers: usize,
    active_writers: usize,
    current_axis: Option<Axis>,
    last_axis: Option<Axis>,
    /// Planes of `current_axis` held by active writers.
    occupied: Vec<bool>,
    /// Waiting writer tickets, indexed by `axis * size + plane`.
    writer_slots: Vec<VecDeque<Ticket>>,
    waiting_writers: [usize; AXIS_COUNT],
    waiting_readers: VecDeque<Ticket>,
    /// Tickets admitted by another thread but not yet picked up.
    granted: HashSet<Ticket>,
    next_ticket: Ticket,
}

impl State {
    fn new(size: usize) -> Self {
        Self {
            size,
            active_readers: 0,
            active_writers: 0,
            current_axis: None,
            last_axis: None,
            occupied: vec![false; size],
            writer_slots: (0..AXIS_COUNT * size).map(|_| VecDeque::new()).collect(),
            waiting_writers: [0; AXIS_COUNT],
            waiting_readers: VecDeque::new(),
            granted: HashSet::new(),
            next_ticket: 0,
        }
    }

    #[inline]
    fn slot(&self, axis: Axis, plane: Plane) -> usize {
        axis.index() * self.size + plane
    }

    fn ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn writers_waiting(&self) -> usize {
        self.waiting_writers.iter().sum()
    }

    fn other_axes_waiting(&self, axis: Axis) -> bool {
        Axis::ALL
            .iter()
            .any(|&other| other != axis && self.waiting_writers[other.index()] > 0)
    }

    fn writer_may_enter(&self, axis: Axis, plane: Plane) -> bool {
        if self.active_readers > 0
            || !self.waiting_readers.is_empty()
            || self.other_axes_waiting(axis)
        {
            return false;
        }
        match self.current_axis {
            None => true,
            Some(current) => {
                current == axis
                    && !self.occupied[plane]
                    && self.writer_slots[self.slot(axis, plane)].is_empty()
            }
        }
    }

    fn reader_may_enter(&self) -> bool {
        self.active_writers == 0 && self.writers_waiting() == 0
    }

    fn occupy(&mut self, axis: Axis, plane: Plane) {
        if self.active_writers == 0 {
            self.current_axis = Some(axis);
        }
        self.occupied[plane] = true;
        self.active_writers += 1;
    }

    /// Admits the head of every free plane's queue on `axis`.
    fn grant_free_planes(&mut self, axis: Axis, wakers: &Wakers) -> usize {
        let mut admitted = 0;
        for plane in 0..self.size {
            if self.occupied[plane] {
                continue;
            }
            let slot = self.slot(axis, plane);
            if let Some(ticket) = self.writer_slots[slot].pop_front() {
                self.granted.insert(ticket);
                self.waiting_writers[axis.index()] -= 1;
                self.occupy(axis, plane);
                admitted += 1;
            }
        }
        if admitted > 0 {
            wakers.writers[axis.index()].notify_all();
        }
        admitted
    }

    /// Lets queued writers of the running axis join it, unless someone else
    /// is waiting for the group to end.
    fn hand_off(&mut self, axis: Axis, wakers: &Wakers) {
        if !self.waiting_readers.is_empty() || self.other_axes_waiting(axis) {
            return;
        }
        let admitted = self.grant_free_planes(axis, wakers);
        if admitted > 0 {
            trace!(?axis, admitted, active_writers = self.active_writers, "handed off");
        }
    }

    fn admit_readers(&mut self, wakers: &Wakers) -> bool {
        if self.waiting_readers.is_empty() {
            return false;
        }
        let batch = self.waiting_readers.len();
        self.active_readers += batch;
        self.granted.extend(self.waiting_readers.drain(..));
        wakers.readers.notify_all();
        debug!(batch, active_readers = self.active_readers, "admitted reader batch");
        true
    }

    /// Round-robin over axes, starting after the one that finished last.
    fn admit_next_axis(&mut self, wakers: &Wakers) -> bool {
        let mut axis = self.last_axis.map_or(Axis::TopBottom, Axis::next);
        for _ in 0..AXIS_COUNT {
            if self.waiting_writers[axis.index()] > 0 {
                let admitted = self.grant_free_planes(axis, wakers);
                debug!(?axis, admitted, "admitted writer group");
                return true;
            }
            axis = axis.next();
        }
        false
    }

    /// Called when the last active caller leaves.
    fn dispatch(&mut self, turn: Turn, wakers: &Wakers) {
        debug_assert!(self.active_readers == 0 && self.active_writers == 0);
        let admitted = match turn {
            Turn::Readers => self.admit_readers(wakers) || self.admit_next_axis(wakers),
            Turn::Writers => self.admit_next_axis(wakers) || self.admit_readers(wakers),
        };
        if !admitted {
            trace!("coordinator idle");
        }
    }

    /// Re-evaluates admissions after a waiter withdrew.
    fn rebalance(&mut self, wakers: &Wakers) {
        if self.active_readers == 0 && self.active_writers == 0 {
            self.dispatch(Turn::Writers, wakers);
        } else if self.active_writers == 0 {
            if self.writers_waiting() == 0 {
                self.admit_readers(wakers);
            }
        } else if let Some(axis) = self.current_axis {
            self.hand_off(axis, wakers);
        }
    }

    fn release_writer(&mut self, axis: Axis, plane: Plane, wakers: &Wakers) {
        debug_assert_eq!(self.current_axis, Some(axis));
        self.active_writers -= 1;
        self.occupied[plane] = false;
        trace!(?axis, plane, active_writers = self.active_writers, "writer released");
        if self.active_writers == 0 {
            self.last_axis = self.current_axis.take();
            self.dispatch(Turn::Readers, wakers);
        } else {
            self.hand_off(axis, wakers);
        }
    }

    fn release_reader(&mut self, wakers: &Wakers) {
        self.active_readers -= 1;
        trace!(active_readers = self.active_readers, "reader released");
        if self.active_readers == 0 {
            self.dispatch(Turn::Writers, wakers);
        }
    }

    fn withdraw_writer(&mut self, ticket: Ticket, axis: Axis, plane: Plane, wakers: &Wakers) {
        let slot = self.slot(axis, plane);
        let queue = &mut self.writer_slots[slot];
        if let Some(position) = queue.iter().position(|&t| t == ticket) {
            queue.remove(position);
            self.waiting_writers[axis.index()] -= 1;
        }
        self.rebalance(wakers);
    }

    fn withdraw_reader(&mut self, ticket: Ticket, wakers: &Wakers) {
        if let Some(position) = self.waiting_readers.iter().position(|&t| t == ticket) {
            self.waiting_readers.remove(position);
        }
        self.rebalance(wakers);
    }

    fn stats(&self) -> CoordinatorStats {
        CoordinatorStats {
            active_readers: self.active_readers,
            active_writers: self.active_writers,
            waiting_readers: self.waiting_readers.len(),
            waiting_writers: self.waiting_writers,
            current_axis: self.current_axis,
            last_axis: self.last_axis,
            occupied_planes: (0..self.size).filter(|&p| self.occupied[p]).collect(),
        }
    }
}

/// Point-in-time view of the coordinator's bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    /// Snapshots currently running.
    pub active_readers: usize,
    /// Rotations currently running.
    pub active_writers: usize,
    /// Snapshots waiting for admission.
    pub waiting_readers: usize,
    /// Rotations waiting for admission, per [`Axis::index`].
    pub waiting_writers: [usize; AXIS_COUNT],
    /// Axis of the running writer group.
    pub current_axis: Option<Axis>,
    /// Axis of the most recently finished writer group.
    pub last_axis: Option<Axis>,
    /// Planes of `current_axis` held by running rotations.
    pub occupied_planes: Vec<Plane>,
}

impl CoordinatorStats {
    /// Rotations waiting on any axis.
    #[must_use]
    pub fn total_waiting_writers(&self) -> usize {
        self.waiting_writers.iter().sum()
    }

    /// Nobody is running and nobody is waiting.
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.active_readers == 0
            && self.active_writers == 0
            && self.waiting_readers == 0
            && self.total_waiting_writers() == 0
            && self.current_axis.is_none()
            && self.occupied_planes.is_empty()
    }
}

/// Admission control for one cube.
#[derive(Debug)]
pub struct Coordinator {
    monitor: Arc<Monitor>,
    size: usize,
    wait_timeout: Option<Duration>,
}

impl Coordinator {
    /// Creates a coordinator for a cube with `size` planes per axis.
    ///
    /// `wait_timeout` bounds how long a caller may wait for admission.
    #[must_use]
    pub fn new(size: usize, wait_timeout: Option<Duration>) -> Self {
        Self {
            monitor: Arc::new(Monitor {
                state: Mutex::new(State::new(size)),
                wakers: Wakers::new(),
            }),
            size,
            wait_timeout,
        }
    }

    /// Planes per axis.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Configured wait timeout.
    #[inline]
    #[must_use]
    pub const fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout
    }

    /// Blocks until `request` may rotate, then returns the access that
    /// releases it on drop.
    ///
    /// # Errors
    ///
    /// - [`CubeError::Geometry`] if the request's plane does not exist here.
    /// - [`CubeError::Cancelled`] if `cancel` fired while waiting.
    /// - [`CubeError::TimedOut`] if the wait timeout elapsed.
    pub fn write(
        &self,
        request: &RotationRequest,
        cancel: Option<&CancelToken>,
    ) -> CubeResult<WriteAccess<'_>> {
        let axis = request.axis();
        let plane = request.plane();
        if plane >= self.size {
            return Err(GeometryError::LayerOutOfRange {
                layer: request.layer(),
                size: self.size,
            }
            .into());
        }
        let wakers = &self.monitor.wakers;
        let mut state = self.monitor.state.lock();

        if state.writer_may_enter(axis, plane) {
            state.occupy(axis, plane);
            trace!(?axis, plane, active_writers = state.active_writers, "writer admitted");
            state.hand_off(axis, wakers);
            return Ok(self.write_access(axis, plane));
        }

        let ticket = state.ticket();
        let slot = state.slot(axis, plane);
        state.writer_slots[slot].push_back(ticket);
        state.waiting_writers[axis.index()] += 1;
        trace!(?axis, plane, ticket, "writer waiting");

        match self.await_grant(&mut state, ticket, WaitQueue::Writers(axis), cancel) {
            Outcome::Granted => {
                trace!(?axis, plane, ticket, "writer admitted by hand-off");
                Ok(self.write_access(axis, plane))
            }
            outcome => {
                state.withdraw_writer(ticket, axis, plane, wakers);
                debug!(?axis, plane, ticket, ?outcome, "writer withdrew");
                Err(self.withdrawal_error(outcome))
            }
        }
    }

    /// Blocks until a snapshot may run, then returns the access that
    /// releases it on drop.
    ///
    /// # Errors
    ///
    /// [`CubeError::Cancelled`] or [`CubeError::TimedOut`] as for
    /// [`write`](Self::write).
    pub fn read(&self, cancel: Option<&CancelToken>) -> CubeResult<ReadAccess<'_>> {
        let wakers = &self.monitor.wakers;
        let mut state = self.monitor.state.lock();

        if state.reader_may_enter() {
            state.active_readers += 1;
            trace!(active_readers = state.active_readers, "reader admitted");
            return Ok(ReadAccess { coordinator: self });
        }

        let ticket = state.ticket();
        state.waiting_readers.push_back(ticket);
        trace!(ticket, "reader waiting");

        match self.await_grant(&mut state, ticket, WaitQueue::Readers, cancel) {
            Outcome::Granted => Ok(ReadAccess { coordinator: self }),
            outcome => {
                state.withdraw_reader(ticket, wakers);
                debug!(ticket, ?outcome, "reader withdrew");
                Err(self.withdrawal_error(outcome))
            }
        }
    }

    /// Current bookkeeping.
    #[must_use]
    pub fn stats(&self) -> CoordinatorStats {
        self.monitor.state.lock().stats()
    }

    fn write_access(&self, axis: Axis, plane: Plane) -> WriteAccess<'_> {
        WriteAccess {
            coordinator: self,
            axis,
            plane,
        }
    }

    fn withdrawal_error(&self, outcome: Outcome) -> CubeError {
        match outcome {
            Outcome::TimedOut => CubeError::TimedOut(self.wait_timeout.unwrap_or_default()),
            Outcome::Cancelled | Outcome::Granted => CubeError::Cancelled,
        }
    }

    /// Sleeps until `ticket` is granted, `cancel` fires or the timeout
    /// elapses. A grant always wins over the other two.
    fn await_grant(
        &self,
        state: &mut MutexGuard<'_, State>,
        ticket: Ticket,
        queue: WaitQueue,
        cancel: Option<&CancelToken>,
    ) -> Outcome {
        let deadline = self.wait_timeout.map(|timeout| Instant::now() + timeout);
        if let Some(token) = cancel {
            token.register(ticket, &self.monitor, queue);
        }
        let condvar = self.monitor.wakers.condvar(queue);

        let outcome = loop {
            if state.granted.remove(&ticket) {
                break Outcome::Granted;
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                break Outcome::Cancelled;
            }
            match deadline {
                Some(deadline) => {
                    if condvar.wait_until(state, deadline).timed_out()
                        && !state.granted.contains(&ticket)
                    {
                        break Outcome::TimedOut;
                    }
                }
                None => condvar.wait(state),
            }
        };

        if let Some(token) = cancel {
            token.unregister(ticket, &self.monitor);
        }
        outcome
    }

    fn release_writer(&self, axis: Axis, plane: Plane) {
        self.monitor
            .state
            .lock()
            .release_writer(axis, plane, &self.monitor.wakers);
    }

    fn release_reader(&self) {
        self.monitor.state.lock().release_reader(&self.monitor.wakers);
    }
}

/// Permission to rotate one plane. Released on drop.
#[derive(Debug)]
#[must_use = "dropping the access releases it immediately"]
pub struct WriteAccess<'a> {
    coordinator: &'a Coordinator,
    axis: Axis,
    plane: Plane,
}

impl WriteAccess<'_> {
    /// Axis being rotated.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Plane held on that axis.
    #[must_use]
    pub const fn plane(&self) -> Plane {
        self.plane
    }
}

impl Drop for WriteAccess<'_> {
    fn drop(&mut self) {
        self.coordinator.release_writer(self.axis, self.plane);
    }
}

/// Permission to read the whole grid. Released on drop.
#[derive(Debug)]
#[must_use = "dropping the access releases it immediately"]
pub struct ReadAccess<'a> {
    coordinator: &'a Coordinator,
}

impl Drop for ReadAccess<'_> {
    fn drop(&mut self) {
        self.coordinator.release_reader();
    }
}
