//! In-memory record store.
//!
//! Holds the roster, qualification and station catalogs, watch times, and
//! leave, with the add/remove/rename/reorder operations an editor needs.
//! Uniqueness and leave rules are enforced here at write time, and again
//! when a snapshot is loaded, so the engine can assume clean input. State
//! can be snapshotted to JSON.
//!
//! The generated watchbill is never stored.

mod ordering;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::engine::WatchbillRequest;
use crate::error::{StoreError, StoreResult};
use crate::models::{LeaveInterval, Qualification, Sailor, WatchStation, WatchTime};
use crate::validation::{validate_input, ValidationInput, ValidationResult};

/// Identifier assigned to a leave record.
pub type LeaveId = u64;

/// The roster, catalogs, and leave records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStore {
    sailors: Vec<Sailor>,
    qualifications: Vec<Qualification>,
    stations: Vec<WatchStation>,
    times: Vec<WatchTime>,
    leaves: BTreeMap<LeaveId, LeaveInterval>,
    next_leave_id: LeaveId,
}

fn non_empty(kind: &'static str, name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        Err(StoreError::EmptyName { kind })
    } else {
        Ok(())
    }
}

fn check_leave(leave: &LeaveInterval) -> StoreResult<()> {
    if leave.leave_type.trim().is_empty() {
        return Err(StoreError::MissingLeaveType);
    }
    if leave.start_date >= leave.end_date {
        return Err(StoreError::InvalidLeaveDates {
            start: leave.start_date,
            end: leave.end_date,
        });
    }
    Ok(())
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- sailors ----

    /// All sailors, in insertion order.
    pub fn sailors(&self) -> &[Sailor] {
        &self.sailors
    }

    /// Looks up a sailor by last name.
    pub fn sailor(&self, last_name: &str) -> Option<&Sailor> {
        self.sailors.iter().find(|s| s.last_name == last_name)
    }

    fn sailor_index(&self, last_name: &str) -> StoreResult<usize> {
        self.sailors
            .iter()
            .position(|s| s.last_name == last_name)
            .ok_or_else(|| StoreError::NotFound {
                kind: "sailor",
                name: last_name.to_string(),
            })
    }

    /// Adds a sailor with no qualifications.
    pub fn add_sailor(
        &mut self,
        rank: impl Into<String>,
        last_name: impl Into<String>,
    ) -> StoreResult<()> {
        let last_name = last_name.into();
        non_empty("sailor", &last_name)?;
        if self.sailor(&last_name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "sailor",
                name: last_name,
            });
        }
        debug!("adding sailor {last_name}");
        self.sailors.push(Sailor::new(rank, last_name));
        Ok(())
    }

    /// Removes a sailor and all of their leave.
    pub fn remove_sailor(&mut self, last_name: &str) -> StoreResult<Sailor> {
        let idx = self.sailor_index(last_name)?;
        self.leaves.retain(|_, l| l.sailor != last_name);
        debug!("removed sailor {last_name}");
        Ok(self.sailors.remove(idx))
    }

    /// Changes a sailor's rank and last name. Leave follows the rename.
    pub fn edit_sailor(
        &mut self,
        last_name: &str,
        new_rank: impl Into<String>,
        new_last_name: impl Into<String>,
    ) -> StoreResult<()> {
        let new_last_name = new_last_name.into();
        non_empty("sailor", &new_last_name)?;
        let idx = self.sailor_index(last_name)?;
        if new_last_name != last_name && self.sailor(&new_last_name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "sailor",
                name: new_last_name,
            });
        }

        for leave in self.leaves.values_mut() {
            if leave.sailor == last_name {
                leave.sailor.clone_from(&new_last_name);
            }
        }
        let sailor = &mut self.sailors[idx];
        sailor.rank = new_rank.into();
        sailor.last_name = new_last_name;
        Ok(())
    }

    /// Replaces a sailor's qualifications. Each must exist in the catalog.
    pub fn set_sailor_qualifications<I, S>(&mut self, last_name: &str, names: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let idx = self.sailor_index(last_name)?;
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(unknown) = names.iter().find(|n| self.qualification(n).is_none()) {
            return Err(StoreError::NotFound {
                kind: "qualification",
                name: unknown.clone(),
            });
        }
        self.sailors[idx].qualifications = names.into_iter().collect();
        Ok(())
    }

    // ---- qualifications ----

    /// Qualifications in display order.
    pub fn qualifications(&self) -> &[Qualification] {
        &self.qualifications
    }

    /// Looks up a qualification by name.
    pub fn qualification(&self, name: &str) -> Option<&Qualification> {
        self.qualifications.iter().find(|q| q.name == name)
    }

    /// Appends a qualification to the end of the list.
    pub fn add_qualification(&mut self, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        non_empty("qualification", &name)?;
        if self.qualification(&name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "qualification",
                name,
            });
        }
        let order = self.qualifications.len();
        self.qualifications.push(Qualification::new(name, order));
        Ok(())
    }

    /// Removes a qualification from the catalog and from every sailor.
    pub fn remove_qualification(&mut self, name: &str) -> StoreResult<()> {
        let idx = ordering::position(&self.qualifications, name)?;
        self.qualifications.remove(idx);
        ordering::renumber(&mut self.qualifications);
        for sailor in &mut self.sailors {
            sailor.qualifications.remove(name);
        }
        Ok(())
    }

    /// Renames a qualification, updating every sailor who holds it.
    pub fn rename_qualification(&mut self, old: &str, new: impl Into<String>) -> StoreResult<()> {
        let new = new.into();
        non_empty("qualification", &new)?;
        let idx = ordering::position(&self.qualifications, old)?;
        if new != old && self.qualification(&new).is_some() {
            return Err(StoreError::Duplicate {
                kind: "qualification",
                name: new,
            });
        }
        for sailor in &mut self.sailors {
            if sailor.qualifications.remove(old) {
                sailor.qualifications.insert(new.clone());
            }
        }
        self.qualifications[idx].name = new;
        Ok(())
    }

    /// Moves a qualification one place up. `Ok(false)` if already first.
    pub fn move_qualification_up(&mut self, name: &str) -> StoreResult<bool> {
        ordering::move_up(&mut self.qualifications, name)
    }

    /// Moves a qualification one place down. `Ok(false)` if already last.
    pub fn move_qualification_down(&mut self, name: &str) -> StoreResult<bool> {
        ordering::move_down(&mut self.qualifications, name)
    }

    /// Moves a qualification to a position.
    pub fn move_qualification_to(&mut self, name: &str, index: usize) -> StoreResult<()> {
        ordering::move_to(&mut self.qualifications, name, index)
    }

    /// Inserts a new qualification at a position.
    pub fn insert_qualification_at(
        &mut self,
        name: impl Into<String>,
        index: usize,
    ) -> StoreResult<()> {
        let name = name.into();
        non_empty("qualification", &name)?;
        if self.qualification(&name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "qualification",
                name,
            });
        }
        ordering::insert_at(&mut self.qualifications, Qualification::new(name, 0), index)
    }

    // ---- stations ----

    /// Stations in display order.
    pub fn stations(&self) -> &[WatchStation] {
        &self.stations
    }

    /// Looks up a station by name.
    pub fn station(&self, name: &str) -> Option<&WatchStation> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Appends a station to the end of the list.
    pub fn add_station(&mut self, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        non_empty("watch station", &name)?;
        if self.station(&name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "watch station",
                name,
            });
        }
        let order = self.stations.len();
        self.stations.push(WatchStation::new(name, order));
        Ok(())
    }

    /// Removes a station.
    pub fn remove_station(&mut self, name: &str) -> StoreResult<()> {
        let idx = ordering::position(&self.stations, name)?;
        self.stations.remove(idx);
        ordering::renumber(&mut self.stations);
        Ok(())
    }

    /// Renames a station in place.
    pub fn rename_station(&mut self, old: &str, new: impl Into<String>) -> StoreResult<()> {
        let new = new.into();
        non_empty("watch station", &new)?;
        let idx = ordering::position(&self.stations, old)?;
        if new != old && self.station(&new).is_some() {
            return Err(StoreError::Duplicate {
                kind: "watch station",
                name: new,
            });
        }
        self.stations[idx].name = new;
        Ok(())
    }

    /// Moves a station one place up. `Ok(false)` if already first.
    pub fn move_station_up(&mut self, name: &str) -> StoreResult<bool> {
        ordering::move_up(&mut self.stations, name)
    }

    /// Moves a station one place down. `Ok(false)` if already last.
    pub fn move_station_down(&mut self, name: &str) -> StoreResult<bool> {
        ordering::move_down(&mut self.stations, name)
    }

    /// Moves a station to a position.
    pub fn move_station_to(&mut self, name: &str, index: usize) -> StoreResult<()> {
        ordering::move_to(&mut self.stations, name, index)
    }

    /// Inserts a new station at a position.
    pub fn insert_station_at(&mut self, name: impl Into<String>, index: usize) -> StoreResult<()> {
        let name = name.into();
        non_empty("watch station", &name)?;
        if self.station(&name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "watch station",
                name,
            });
        }
        ordering::insert_at(&mut self.stations, WatchStation::new(name, 0), index)
    }

    // ---- watch times ----

    /// Watch times, in insertion order.
    pub fn times(&self) -> &[WatchTime] {
        &self.times
    }

    /// Adds a time block. The start/end pair must be new.
    pub fn add_time(&mut self, start: impl Into<String>, end: impl Into<String>) -> StoreResult<()> {
        let time = WatchTime::new(start, end);
        non_empty("watch time", &time.start)?;
        non_empty("watch time", &time.end)?;
        if self.times.contains(&time) {
            return Err(StoreError::Duplicate {
                kind: "watch time",
                name: time.label(),
            });
        }
        self.times.push(time);
        Ok(())
    }

    fn time_index(&self, time: &WatchTime) -> StoreResult<usize> {
        self.times
            .iter()
            .position(|t| t == time)
            .ok_or_else(|| StoreError::NotFound {
                kind: "watch time",
                name: time.label(),
            })
    }

    /// Removes a time block.
    pub fn remove_time(&mut self, time: &WatchTime) -> StoreResult<()> {
        let idx = self.time_index(time)?;
        self.times.remove(idx);
        Ok(())
    }

    /// Replaces a time block in place.
    pub fn edit_time(&mut self, old: &WatchTime, new: WatchTime) -> StoreResult<()> {
        non_empty("watch time", &new.start)?;
        non_empty("watch time", &new.end)?;
        let idx = self.time_index(old)?;
        if new != *old && self.times.contains(&new) {
            return Err(StoreError::Duplicate {
                kind: "watch time",
                name: new.label(),
            });
        }
        self.times[idx] = new;
        Ok(())
    }

    // ---- leave ----

    /// Leave records by id.
    pub fn leaves(&self) -> impl Iterator<Item = (LeaveId, &LeaveInterval)> {
        self.leaves.iter().map(|(id, l)| (*id, l))
    }

    /// A single leave record.
    pub fn leave(&self, id: LeaveId) -> Option<&LeaveInterval> {
        self.leaves.get(&id)
    }

    /// Records leave for a known sailor. The type must be set and the end
    /// date must follow the start.
    pub fn add_leave(&mut self, leave: LeaveInterval) -> StoreResult<LeaveId> {
        self.sailor_index(&leave.sailor)?;
        check_leave(&leave)?;
        let id = self.next_leave_id;
        self.next_leave_id += 1;
        debug!(
            "leave #{id} for {}: {} .. {}",
            leave.sailor, leave.start_date, leave.end_date
        );
        self.leaves.insert(id, leave);
        Ok(id)
    }

    /// Replaces dates, type, and notes of a leave record. The sailor is kept.
    pub fn edit_leave(
        &mut self,
        id: LeaveId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: impl Into<String>,
        notes: impl Into<String>,
    ) -> StoreResult<()> {
        let leave = self.leaves.get_mut(&id).ok_or(StoreError::LeaveNotFound(id))?;
        let updated = LeaveInterval::new(leave.sailor.clone(), start_date, end_date)
            .with_type(leave_type)
            .with_notes(notes);
        check_leave(&updated)?;
        *leave = updated;
        Ok(())
    }

    /// Deletes a leave record.
    pub fn remove_leave(&mut self, id: LeaveId) -> StoreResult<LeaveInterval> {
        self.leaves.remove(&id).ok_or(StoreError::LeaveNotFound(id))
    }

    // ---- generation & snapshots ----

    /// Collects everything the engine needs for `date`.
    pub fn request_for(&self, date: NaiveDate) -> WatchbillRequest {
        WatchbillRequest::new(date)
            .with_stations(self.stations.clone())
            .with_times(self.times.clone())
            .with_sailors(self.sailors.clone())
            .with_leaves(self.leaves.values().cloned().collect())
    }

    /// Runs input validation over the whole store.
    pub fn validate(&self) -> ValidationResult {
        let leaves: Vec<LeaveInterval> = self.leaves.values().cloned().collect();
        validate_input(ValidationInput {
            sailors: &self.sailors,
            qualifications: &self.qualifications,
            stations: &self.stations,
            times: &self.times,
            leaves: &leaves,
        })
    }

    /// Serializes the store to pretty JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a store from JSON.
    ///
    /// The snapshot must satisfy the same rules as the write operations:
    /// unique non-empty names, qualifications present in the catalog, and
    /// leave for known sailors with a type and a forward date range.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let mut store: Self = serde_json::from_str(json)?;
        store.check_integrity()?;
        store.qualifications.sort_by_key(|q| q.display_order);
        store.stations.sort_by_key(|s| s.display_order);
        ordering::renumber(&mut store.qualifications);
        ordering::renumber(&mut store.stations);
        if let Some(max) = store.leaves.keys().next_back() {
            store.next_leave_id = store.next_leave_id.max(max + 1);
        }
        Ok(store)
    }

    fn check_integrity(&self) -> StoreResult<()> {
        let mut last_names = HashSet::new();
        for sailor in &self.sailors {
            non_empty("sailor", &sailor.last_name)?;
            if !last_names.insert(sailor.last_name.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: "sailor",
                    name: sailor.last_name.clone(),
                });
            }
        }
        ordering::check_names(&self.qualifications)?;
        ordering::check_names(&self.stations)?;

        let mut times = HashSet::new();
        for time in &self.times {
            non_empty("watch time", &time.start)?;
            non_empty("watch time", &time.end)?;
            if !times.insert(time) {
                return Err(StoreError::Duplicate {
                    kind: "watch time",
                    name: time.label(),
                });
            }
        }

        for sailor in &self.sailors {
            if let Some(name) = sailor
                .qualifications
                .iter()
                .find(|q| self.qualification(q).is_none())
            {
                return Err(StoreError::NotFound {
                    kind: "qualification",
                    name: name.clone(),
                });
            }
        }
        for leave in self.leaves.values() {
            self.sailor_index(&leave.sailor)?;
            check_leave(leave)?;
        }
        Ok(())
    }

    /// Writes a JSON snapshot to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads a JSON snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
