use super::{AutonomousEntity, ControlledEntity};

/// Named, ordered collection of autonomous entities.
pub struct EntityGroup<'a> {
    pub name: &'static str,
    pub members: Vec<&'a mut dyn AutonomousEntity>,
}

/// Borrowed view of every entity the loop drives for one phase.
///
/// Group order is declaration order, and is used for both update and render.
/// An empty group and a missing controlled entity are both valid.
#[derive(Default)]
pub struct EntityRegistry<'a> {
    groups: Vec<EntityGroup<'a>>,
    controlled: Option<&'a mut dyn ControlledEntity>,
}

impl<'a> EntityRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group after every group declared so far.
    pub fn group<E>(mut self, name: &'static str, members: &'a mut [E]) -> Self
    where
        E: AutonomousEntity + 'a,
    {
        let members = members
            .iter_mut()
            .map(|e| e as &mut dyn AutonomousEntity)
            .collect();
        self.groups.push(EntityGroup { name, members });
        self
    }

    /// Sets the controlled entity, replacing any previous one.
    pub fn controlled(mut self, entity: &'a mut dyn ControlledEntity) -> Self {
        self.controlled = Some(entity);
        self
    }

    pub fn groups(&self) -> &[EntityGroup<'a>] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [EntityGroup<'a>] {
        &mut self.groups
    }

    pub fn controlled_mut(&mut self) -> Option<&mut (dyn ControlledEntity + 'a)> {
        self.controlled.as_deref_mut()
    }

    pub fn controlled_ref(&self) -> Option<&(dyn ControlledEntity + 'a)> {
        self.controlled.as_deref()
    }

    /// Total autonomous entities across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.controlled.is_none()
    }
}
