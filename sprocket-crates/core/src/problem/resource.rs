/// A resource which modes can require.
///
/// The three kinds behave very differently in the compiled model, so every compilation pass
/// which cares about the kind matches on this enum exhaustively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// A disjunctive resource: at most one task can use it at any point in time.
    Machine(Machine),
    /// A resource whose capacity bounds the demand of the tasks which are active at the same
    /// time.
    Renewable(Renewable),
    /// A resource whose capacity bounds the total demand over the whole schedule.
    NonRenewable(NonRenewable),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Machine {
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Renewable {
    pub capacity: i32,
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonRenewable {
    pub capacity: i32,
    pub name: Option<String>,
}

impl Resource {
    pub fn machine() -> Resource {
        Resource::Machine(Machine::default())
    }

    pub fn renewable(capacity: i32) -> Resource {
        Resource::Renewable(Renewable {
            capacity,
            name: None,
        })
    }

    pub fn non_renewable(capacity: i32) -> Resource {
        Resource::NonRenewable(NonRenewable {
            capacity,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Resource {
        let name = Some(name.into());
        match &mut self {
            Resource::Machine(machine) => machine.name = name,
            Resource::Renewable(renewable) => renewable.name = name,
            Resource::NonRenewable(non_renewable) => non_renewable.name = name,
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Resource::Machine(machine) => machine.name.as_deref(),
            Resource::Renewable(renewable) => renewable.name.as_deref(),
            Resource::NonRenewable(non_renewable) => non_renewable.name.as_deref(),
        }
    }

    /// The capacity of the resource; a machine has a capacity of one.
    pub fn capacity(&self) -> i32 {
        match self {
            Resource::Machine(_) => 1,
            Resource::Renewable(renewable) => renewable.capacity,
            Resource::NonRenewable(non_renewable) => non_renewable.capacity,
        }
    }

    pub fn is_machine(&self) -> bool {
        matches!(self, Resource::Machine(_))
    }
}
