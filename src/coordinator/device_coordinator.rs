// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll/merge/write coordinator for one device.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};

use crate::command::Command;
use crate::error::Error;
use crate::event::{DeviceEvent, EventBus, SkipReason};
use crate::protocol::{GreeClient, Transport, UdpTransport};
use crate::state::{DeviceState, FieldMap, PendingDelta};
use crate::types::{Field, PowerState};

use super::PollingHandle;

/// Owns the state of one device and reconciles local intent with it.
///
/// Consumers queue field changes with [`update_state`](Self::update_state)
/// and ask for a prompt [`request_refresh`](Self::request_refresh). Each
/// reconcile polls the device, drops the pending values it already holds,
/// and writes the rest unless the device is off and the changes do not
/// power it on.
///
/// Reconciles are serialized: a refresh requested while another is in
/// flight waits for it to finish, so requests to the device never overlap.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use gree_lib::DeviceConfig;
/// use gree_lib::types::Field;
///
/// # async fn example() -> gree_lib::Result<()> {
/// let coordinator = Arc::new(
///     DeviceConfig::new("192.168.1.60", "c8:f7:42:aa:bb:cc")?.into_coordinator(),
/// );
/// coordinator.first_refresh().await?;
/// let _polling = coordinator.spawn_polling();
///
/// coordinator.update_state([(Field::SetTem, 22)]);
/// coordinator.request_refresh().await;
///
/// let state = coordinator.current_state();
/// println!("target: {:?}", state.climate().target_temperature());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Coordinator<T = UdpTransport> {
    client: GreeClient<T>,
    name: String,
    poll_interval: Duration,
    pending: Mutex<PendingDelta>,
    reconcile_lock: tokio::sync::Mutex<()>,
    state_tx: watch::Sender<DeviceState>,
    events: EventBus,
}

impl<T: Transport> Coordinator<T> {
    /// Creates a coordinator around a client.
    #[must_use]
    pub fn new(client: GreeClient<T>, poll_interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(DeviceState::new());
        Self {
            name: client.mac().to_string(),
            client,
            poll_interval,
            pending: Mutex::new(PendingDelta::new()),
            reconcile_lock: tokio::sync::Mutex::new(()),
            state_tx,
            events: EventBus::new(),
        }
    }

    /// Sets the name used in log messages.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &GreeClient<T> {
        &self.client
    }

    /// Returns the last published state.
    #[must_use]
    pub fn current_state(&self) -> DeviceState {
        self.state_tx.borrow().clone()
    }

    /// Returns a receiver that sees every published state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.state_tx.subscribe()
    }

    /// Subscribes to reconcile events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }

    /// Returns the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns a copy of the changes not yet written.
    #[must_use]
    pub fn pending(&self) -> PendingDelta {
        self.pending.lock().clone()
    }

    /// Queues field changes for the next reconcile.
    ///
    /// Later values replace earlier ones for the same field. No request is
    /// sent; call [`request_refresh`](Self::request_refresh) to write
    /// promptly instead of waiting for the next poll.
    pub fn update_state<I>(&self, updates: I)
    where
        I: IntoIterator<Item = (Field, i64)>,
    {
        let mut pending = self.pending.lock();
        pending.extend(updates);
        tracing::debug!(device = %self.name, pending = pending.len(), "Queued field changes");
    }

    /// Queues the updates of a command and reconciles.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the command is invalid for the current
    /// state. Reconcile failures are not returned; they are published as
    /// events and the changes stay pending.
    pub async fn apply<C: Command + ?Sized>(&self, command: &C) -> Result<(), Error> {
        let updates = command.updates(self.current_state().fields())?;
        tracing::debug!(device = %self.name, command = command.name(), ?updates, "Applying command");
        self.update_state(updates.iter());
        self.request_refresh().await;
        Ok(())
    }

    /// Runs a reconcile now, logging instead of returning a failure.
    pub async fn request_refresh(&self) {
        if let Err(err) = self.reconcile().await {
            tracing::debug!(device = %self.name, error = %err, "Requested refresh failed");
        }
    }

    /// Runs the initial reconcile.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be reached or its replies cannot
    /// be decoded.
    pub async fn first_refresh(&self) -> Result<DeviceState, Error> {
        let state = self.reconcile().await?;
        tracing::info!(device = %self.name, "Device ready");
        Ok(state)
    }

    /// Polls the device and writes pending changes if needed.
    ///
    /// On failure the pending changes are kept and the previously published
    /// state stays in place.
    ///
    /// # Errors
    ///
    /// Returns error if the poll or the write fails.
    pub async fn reconcile(&self) -> Result<DeviceState, Error> {
        let _guard = self.reconcile_lock.lock().await;

        match self.run_cycle().await {
            Ok(state) => Ok(state),
            Err(err) => {
                tracing::warn!(device = %self.name, error = %err, "Reconcile failed, keeping pending changes");
                self.events.publish(DeviceEvent::failed(&err));
                Err(err)
            }
        }
    }

    /// Starts reconciling every poll interval in the background.
    ///
    /// The first tick is skipped; run [`first_refresh`](Self::first_refresh)
    /// before starting.
    #[must_use]
    pub fn spawn_polling(self: &Arc<Self>) -> PollingHandle
    where
        T: 'static,
    {
        tracing::debug!(device = %self.name, interval = ?self.poll_interval, "Starting polling");
        PollingHandle::spawn(Arc::clone(self), self.poll_interval)
    }

    async fn run_cycle(&self) -> Result<DeviceState, Error> {
        let snapshot = self.pending();
        let current = self.client.status().await?;

        if snapshot.is_empty() {
            return Ok(self.publish(current));
        }

        let effective = snapshot.effective(&current);
        if effective.is_empty() {
            tracing::debug!(device = %self.name, "Pending changes already applied");
            self.pending.lock().remove_applied(&snapshot);
            self.events.publish(DeviceEvent::WriteSkipped {
                reason: SkipReason::AlreadyApplied,
            });
            return Ok(self.publish(current));
        }

        if current.power() == Some(PowerState::Off) && !effective.requests_power_on() {
            tracing::debug!(device = %self.name, fields = ?effective.fields(), "Device is off, not writing pending changes");
            self.events.publish(DeviceEvent::WriteSkipped {
                reason: SkipReason::PoweredOff,
            });
            return Ok(self.publish(current));
        }

        self.client.send_command(&snapshot).await?;
        tracing::info!(device = %self.name, fields = ?snapshot.fields(), "Wrote pending changes");

        self.pending.lock().remove_applied(&snapshot);
        let merged = current.merged(&effective);
        self.events.publish(DeviceEvent::WriteIssued { delta: snapshot });

        Ok(self.publish(merged))
    }

    fn publish(&self, fields: FieldMap) -> DeviceState {
        let state = DeviceState::polled(fields);
        let previous = self.state_tx.send_replace(state.clone());
        let changed = previous.fields().diff(state.fields());

        if !changed.is_empty() {
            tracing::debug!(device = %self.name, ?changed, "State changed");
        }

        self.events.publish(DeviceEvent::StateUpdated {
            state: state.clone(),
            changed,
        });
        state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use super::*;
    use crate::command::ClimateCommand;
    use crate::error::ProtocolError;
    use crate::protocol::codec::{self, Envelope};
    use crate::protocol::{DeviceCipher, RetryPolicy};
    use crate::types::{DeviceMac, FanSpeed, HvacMode};

    const DEVICE_KEY: &str = "0123456789abcdef";

    /// In-memory device speaking the real codec.
    struct FakeDevice {
        fields: Mutex<FieldMap>,
        writes: Mutex<Vec<Value>>,
        statuses: AtomicU32,
        binds: AtomicU32,
        silent: AtomicU32,
        park_next: AtomicBool,
        parked: Notify,
        resume: Notify,
    }

    impl FakeDevice {
        fn new(fields: FieldMap) -> Self {
            Self {
                fields: Mutex::new(fields),
                writes: Mutex::new(Vec::new()),
                statuses: AtomicU32::new(0),
                binds: AtomicU32::new(0),
                silent: AtomicU32::new(0),
                park_next: AtomicBool::new(false),
                parked: Notify::new(),
                resume: Notify::new(),
            }
        }

        fn reply(cipher: &DeviceCipher, pack: &Value) -> Vec<u8> {
            let encoded = codec::encode_pack(cipher, pack).unwrap();
            serde_json::to_vec(&json!({"t": "pack", "i": 0, "uid": 0, "pack": encoded})).unwrap()
        }

        fn handle(&self, request: &[u8]) -> Vec<u8> {
            let envelope: Envelope = serde_json::from_slice(request).unwrap();
            let pack = envelope.pack.unwrap();

            if envelope.sequence == 1 {
                self.binds.fetch_add(1, Ordering::SeqCst);
                let generic = DeviceCipher::generic();
                let bind = codec::decode_pack(&generic, &pack).unwrap();
                assert_eq!(bind["t"], "bind");
                return Self::reply(&generic, &json!({"t": "bindok", "key": DEVICE_KEY}));
            }

            let cipher = DeviceCipher::new(DEVICE_KEY.as_bytes()).unwrap();
            let request = codec::decode_pack(&cipher, &pack).unwrap();
            match request["t"].as_str() {
                Some("status") => {
                    self.statuses.fetch_add(1, Ordering::SeqCst);
                    let fields = self.fields.lock().clone();
                    let dat: Vec<Value> = fields.iter().map(|(_, v)| json!(v)).collect();
                    Self::reply(&cipher, &json!({"t": "dat", "cols": request["cols"], "dat": dat}))
                }
                Some("cmd") => {
                    let opt: Vec<Field> = serde_json::from_value(request["opt"].clone()).unwrap();
                    let p: Vec<i64> = serde_json::from_value(request["p"].clone()).unwrap();
                    let mut fields = self.fields.lock();
                    for (field, value) in opt.iter().zip(&p) {
                        fields.set(*field, *value);
                    }
                    self.writes.lock().push(request.clone());
                    Self::reply(&cipher, &json!({"t": "res", "opt": request["opt"], "p": p, "r": 200}))
                }
                other => panic!("unexpected request {other:?}"),
            }
        }

        fn write_count(&self) -> usize {
            self.writes.lock().len()
        }
    }

    impl Transport for FakeDevice {
        async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, ProtocolError> {
            if self.park_next.swap(false, Ordering::SeqCst) {
                self.parked.notify_one();
                self.resume.notified().await;
            }
            let silent = self.silent.load(Ordering::SeqCst);
            if silent > 0 {
                self.silent.store(silent - 1, Ordering::SeqCst);
                return Err(ProtocolError::Timeout(1));
            }
            Ok(self.handle(request))
        }
    }

    fn cooling() -> FieldMap {
        FieldMap::new()
            .with(Field::Pow, 1)
            .with(Field::Mod, 1)
            .with(Field::SetTem, 25)
            .with(Field::WdSpd, 0)
            .with(Field::Tur, 0)
            .with(Field::Quiet, 0)
            .with(Field::SwUpDn, 0)
    }

    fn coordinator(fields: FieldMap, max_attempts: u32) -> Coordinator<FakeDevice> {
        let client = GreeClient::new(
            FakeDevice::new(fields),
            DeviceMac::new("c8f742aabbcc").unwrap(),
            RetryPolicy::new(max_attempts),
        );
        Coordinator::new(client, Duration::from_secs(60))
    }

    fn device(coordinator: &Coordinator<FakeDevice>) -> &FakeDevice {
        coordinator.client().transport()
    }

    #[tokio::test]
    async fn first_refresh_binds_and_publishes() {
        let coordinator = coordinator(cooling(), 10);
        let mut rx = coordinator.watch();

        let state = coordinator.first_refresh().await.unwrap();
        assert!(state.is_known());
        assert_eq!(state.fields().get(Field::SetTem), Some(25));
        assert_eq!(device(&coordinator).binds.load(Ordering::SeqCst), 1);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().fields(), state.fields());
    }

    #[tokio::test]
    async fn bind_happens_once() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.reconcile().await.unwrap();
        coordinator.reconcile().await.unwrap();
        assert_eq!(device(&coordinator).binds.load(Ordering::SeqCst), 1);
        assert_eq!(device(&coordinator).statuses.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn writes_changed_target_temperature() {
        let coordinator = coordinator(cooling(), 10);
        let mut events = coordinator.subscribe();

        coordinator.update_state([(Field::SetTem, 22)]);
        let state = coordinator.reconcile().await.unwrap();

        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["SetTem"], "p": [22]})]
        );
        assert_eq!(state.fields().get(Field::SetTem), Some(22));
        assert_eq!(coordinator.current_state().fields().get(Field::SetTem), Some(22));
        assert!(coordinator.pending().is_empty());

        assert!(matches!(events.recv().await.unwrap(), DeviceEvent::WriteIssued { .. }));
        match events.recv().await.unwrap() {
            DeviceEvent::StateUpdated { changed, .. } => assert!(changed.contains(&Field::SetTem)),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn matching_delta_skips_write_and_clears() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.first_refresh().await.unwrap();
        let before = coordinator.current_state();

        coordinator.update_state([(Field::SetTem, 25), (Field::Pow, 1)]);
        let state = coordinator.reconcile().await.unwrap();

        assert_eq!(device(&coordinator).write_count(), 0);
        assert_eq!(state.fields(), before.fields());
        assert!(coordinator.pending().is_empty());
    }

    #[tokio::test]
    async fn powered_off_guard_blocks_settings() {
        let coordinator = coordinator(cooling().with(Field::Pow, 0), 10);
        let mut events = coordinator.subscribe();

        coordinator.update_state([(Field::SetTem, 20)]);
        let state = coordinator.reconcile().await.unwrap();

        assert_eq!(device(&coordinator).write_count(), 0);
        assert_eq!(state.fields().get(Field::SetTem), Some(25));
        assert_eq!(coordinator.pending().get(Field::SetTem), Some(20));
        assert!(matches!(
            events.recv().await.unwrap(),
            DeviceEvent::WriteSkipped {
                reason: SkipReason::PoweredOff
            }
        ));
    }

    #[tokio::test]
    async fn power_on_passes_guard_with_queued_settings() {
        let coordinator = coordinator(cooling().with(Field::Pow, 0), 10);

        coordinator.update_state([(Field::SetTem, 20)]);
        coordinator.reconcile().await.unwrap();
        coordinator.update_state([(Field::Pow, 1)]);
        let state = coordinator.reconcile().await.unwrap();

        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["Pow", "SetTem"], "p": [1, 20]})]
        );
        assert_eq!(state.climate().power(), Some(PowerState::On));
        assert!(coordinator.pending().is_empty());
    }

    #[tokio::test]
    async fn later_updates_win() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.update_state([(Field::SetTem, 18)]);
        coordinator.update_state([(Field::SetTem, 21), (Field::Lig, 1)]);
        assert_eq!(coordinator.pending().get(Field::SetTem), Some(21));

        coordinator.reconcile().await.unwrap();
        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["SetTem", "Lig"], "p": [21, 1]})]
        );
    }

    #[tokio::test]
    async fn write_carries_every_pending_field() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.update_state([(Field::SetTem, 25), (Field::WdSpd, 3)]);
        coordinator.reconcile().await.unwrap();

        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["SetTem", "WdSpd"], "p": [25, 3]})]
        );
    }

    #[tokio::test]
    async fn failed_reconcile_keeps_pending_and_state() {
        let coordinator = coordinator(cooling(), 2);
        coordinator.first_refresh().await.unwrap();
        let before = coordinator.current_state();
        let mut events = coordinator.subscribe();

        coordinator.update_state([(Field::SetTem, 22)]);
        device(&coordinator).silent.store(2, Ordering::SeqCst);
        let err = coordinator.reconcile().await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(coordinator.current_state(), before);
        assert_eq!(coordinator.pending().get(Field::SetTem), Some(22));
        assert!(events.recv().await.unwrap().is_failure());

        coordinator.reconcile().await.unwrap();
        assert_eq!(device(&coordinator).write_count(), 1);
        assert!(coordinator.pending().is_empty());
    }

    #[tokio::test]
    async fn request_refresh_swallows_failure() {
        let coordinator = coordinator(cooling(), 1);
        device(&coordinator).silent.store(1, Ordering::SeqCst);
        coordinator.request_refresh().await;
        assert!(!coordinator.current_state().is_known());
    }

    #[tokio::test]
    async fn apply_heat_mode_temperature() {
        let heating = cooling().with(Field::Mod, 4).with(Field::SetTem, 20);
        let coordinator = coordinator(heating, 10);
        let state = coordinator.first_refresh().await.unwrap();
        assert_eq!(state.climate().target_temperature(), Some(23));

        coordinator
            .apply(&ClimateCommand::SetTargetTemperature(25))
            .await
            .unwrap();

        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["SetTem"], "p": [22]})]
        );
        assert_eq!(
            coordinator.current_state().climate().target_temperature(),
            Some(25)
        );
    }

    #[tokio::test]
    async fn apply_fan_and_mode() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.first_refresh().await.unwrap();

        coordinator
            .apply(&ClimateCommand::SetFanSpeed(FanSpeed::Turbo))
            .await
            .unwrap();
        coordinator
            .apply(&ClimateCommand::SetHvacMode(HvacMode::Off))
            .await
            .unwrap();

        let climate_state = coordinator.current_state();
        let climate = climate_state.climate();
        assert_eq!(climate.hvac_mode(), Some(HvacMode::Off));
        assert_eq!(climate.fan_speed(), Some(FanSpeed::Turbo));
    }

    #[tokio::test]
    async fn apply_rejects_out_of_range() {
        let coordinator = coordinator(cooling(), 10);
        coordinator.first_refresh().await.unwrap();
        let err = coordinator
            .apply(&ClimateCommand::SetTargetTemperature(40))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Value(_)));
        assert!(coordinator.pending().is_empty());
    }

    #[tokio::test]
    async fn concurrent_refreshes_do_not_overlap() {
        let coordinator = Arc::new(coordinator(cooling(), 10));
        coordinator.update_state([(Field::SetTem, 22)]);

        let first = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.request_refresh().await }
        });
        let second = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.request_refresh().await }
        });
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(device(&coordinator).write_count(), 1);
        assert_eq!(device(&coordinator).statuses.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn update_during_reconcile_survives() {
        let coordinator = Arc::new(coordinator(cooling(), 10));
        coordinator.first_refresh().await.unwrap();

        coordinator.update_state([(Field::SetTem, 22)]);
        device(&coordinator).park_next.store(true, Ordering::SeqCst);
        let in_flight = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.reconcile().await }
        });

        device(&coordinator).parked.notified().await;
        coordinator.update_state([(Field::SetTem, 19)]);
        device(&coordinator).resume.notify_one();
        in_flight.await.unwrap().unwrap();

        assert_eq!(
            device(&coordinator).writes.lock().clone(),
            vec![json!({"t": "cmd", "opt": ["SetTem"], "p": [22]})]
        );
        assert_eq!(coordinator.pending().get(Field::SetTem), Some(19));

        let state = coordinator.reconcile().await.unwrap();
        assert_eq!(state.fields().get(Field::SetTem), Some(19));
        assert_eq!(device(&coordinator).write_count(), 2);
        assert!(coordinator.pending().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_poll_interval_keeps_polling() {
        let client = GreeClient::new(
            FakeDevice::new(cooling()),
            DeviceMac::new("c8f742aabbcc").unwrap(),
            RetryPolicy::default(),
        );
        let coordinator = Arc::new(Coordinator::new(client, Duration::ZERO));
        coordinator.first_refresh().await.unwrap();

        let polling = coordinator.spawn_polling();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(!polling.is_finished());
        assert_eq!(device(&coordinator).statuses.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_reconciles_every_interval() {
        let coordinator = Arc::new(coordinator(cooling(), 10));
        coordinator.first_refresh().await.unwrap();

        let polling = coordinator.spawn_polling();
        tokio::time::sleep(Duration::from_secs(125)).await;
        assert_eq!(device(&coordinator).statuses.load(Ordering::SeqCst), 3);

        polling.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(device(&coordinator).statuses.load(Ordering::SeqCst), 3);
    }
}
