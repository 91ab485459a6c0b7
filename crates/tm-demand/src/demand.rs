//! Demand configuration entities and the `Demands` container.

use tracing::debug;

use tm_core::defaults::DEFAULT_DOC_ID;
use tm_core::{
    Entity, EntityKind, Mode, ModeId, SyncDocIds, TimePeriodId, TravellerTypeId, UserClassId,
    impl_entity, inject_default_if_empty, single_candidate, sync_doc_ids,
};

use crate::{DemandError, DemandResult, OdDemands, OdMatrix, TimePeriod};

#[derive(Clone, Debug, PartialEq)]
pub struct TravellerType {
    pub id:          TravellerTypeId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
}

impl_entity!(TravellerType, TravellerTypeId, EntityKind::TravellerType);

/// A class of travellers: one traveller type using one mode.
#[derive(Clone, Debug, PartialEq)]
pub struct UserClass {
    pub id:             UserClassId,
    pub doc_id:         String,
    pub external_id:    Option<String>,
    pub name:           Option<String>,
    pub mode:           ModeId,
    pub traveller_type: TravellerTypeId,
}

impl_entity!(UserClass, UserClassId, EntityKind::UserClass);

/// The demand layer: configuration entities plus OD matrices.
#[derive(Clone, Debug, Default)]
pub struct Demands {
    pub traveller_types: Vec<TravellerType>,
    pub user_classes:    Vec<UserClass>,
    pub time_periods:    Vec<TimePeriod>,
    pub od:              OdDemands,
}

impl Demands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traveller_type(&self, id: TravellerTypeId) -> &TravellerType {
        &self.traveller_types[id.index()]
    }

    pub fn user_class(&self, id: UserClassId) -> &UserClass {
        &self.user_classes[id.index()]
    }

    pub fn time_period(&self, id: TimePeriodId) -> &TimePeriod {
        &self.time_periods[id.index()]
    }

    pub fn add_traveller_type(&mut self, doc_id: impl Into<String>) -> TravellerTypeId {
        let id = TravellerTypeId(self.traveller_types.len() as u32);
        self.traveller_types.push(TravellerType {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
        });
        id
    }

    pub fn add_user_class(
        &mut self,
        doc_id: impl Into<String>,
        mode: ModeId,
        traveller_type: TravellerTypeId,
    ) -> UserClassId {
        let id = UserClassId(self.user_classes.len() as u32);
        self.user_classes.push(UserClass {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            mode,
            traveller_type,
        });
        id
    }

    pub fn add_time_period(
        &mut self,
        doc_id: impl Into<String>,
        start_secs: u32,
        duration_secs: u32,
    ) -> TimePeriodId {
        let id = TimePeriodId(self.time_periods.len() as u32);
        self.time_periods.push(TimePeriod {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            start_secs,
            duration_secs,
        });
        id
    }

    /// Add the default traveller type if none was declared.
    pub fn inject_default_traveller_type(&mut self) -> bool {
        inject_default_if_empty(&mut self.traveller_types, || TravellerType {
            id:          TravellerTypeId(0),
            doc_id:      DEFAULT_DOC_ID.to_owned(),
            external_id: None,
            name:        Some(DEFAULT_DOC_ID.to_owned()),
        })
    }

    /// Add the default user class if none was declared.
    ///
    /// # Errors
    ///
    /// [`tm_core::CoreError::AmbiguousDefault`] unless there is exactly one
    /// mode and exactly one traveller type to bind it to.
    pub fn inject_default_user_class(&mut self, modes: &[Mode]) -> DemandResult<bool> {
        if !self.user_classes.is_empty() {
            return Ok(false);
        }
        let mode = single_candidate(modes)?.id;
        let traveller_type = single_candidate(&self.traveller_types)?.id;
        Ok(inject_default_if_empty(&mut self.user_classes, || UserClass {
            id:          UserClassId(0),
            doc_id:      DEFAULT_DOC_ID.to_owned(),
            external_id: None,
            name:        Some(DEFAULT_DOC_ID.to_owned()),
            mode,
            traveller_type,
        }))
    }

    /// Store `matrix` as the demand of `mode` during `time_period`.
    ///
    /// # Errors
    ///
    /// [`DemandError::MultipleMatrices`] if that pair already has a matrix;
    /// the stored matrix is left untouched.
    pub fn register_od_matrix(
        &mut self,
        mode: &Mode,
        time_period: TimePeriodId,
        matrix: OdMatrix,
    ) -> DemandResult<()> {
        let total = matrix.total();
        self.od.try_insert(mode.id, time_period, matrix).map_err(|_| {
            DemandError::MultipleMatrices {
                mode:        mode.doc_id().to_owned(),
                time_period: self.time_period(time_period).doc_id().to_owned(),
            }
        })?;
        debug!(mode = mode.doc_id(), time_period = %time_period, total_pcu_h = total, "registered OD matrix");
        Ok(())
    }

    /// The only user class travelling by `mode`.
    ///
    /// Documents attribute each matrix to one user class, so demand stored per
    /// mode can only be written when exactly one user class uses that mode.
    pub fn user_class_for_mode(&self, mode: &Mode) -> DemandResult<&UserClass> {
        let matching: Vec<&UserClass> =
            self.user_classes.iter().filter(|uc| uc.mode == mode.id).collect();
        match matching.as_slice() {
            [only] => Ok(*only),
            _ => Err(DemandError::AmbiguousUserClass {
                mode:       mode.doc_id().to_owned(),
                candidates: matching.len(),
            }),
        }
    }
}

impl SyncDocIds for Demands {
    fn sync_doc_ids(&mut self) -> usize {
        sync_doc_ids(&mut self.traveller_types)
            + sync_doc_ids(&mut self.user_classes)
            + sync_doc_ids(&mut self.time_periods)
    }
}
