//! Macros for ergonomic table authoring.

/// Build a [`RawTable`](crate::core::RawTable) from a literal description.
///
/// Each entry maps a state name to a single target, a list of targets, or
/// `_` for the terminal marker. Descriptor targets with preconditions are
/// authored through [`TableBuilder`](crate::builder::TableBuilder) or
/// serde instead.
///
/// # Example
///
/// ```rust
/// use waypoint::core::MachineState;
/// use waypoint::transition_table;
///
/// let table = transition_table! {
///     "ready" => "connecting",
///     "connecting" => ["connected", "closed"],
///     "connected" => ["closed"],
///     "closed" => "connecting",
/// };
///
/// let sm = MachineState::init(&table, None).unwrap();
/// assert_eq!(sm.value(), "ready");
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $($state:literal => $target:tt),* $(,)?
    ) => {{
        let mut table = $crate::core::RawTable::new();
        $(
            table.insert(
                ::std::string::String::from($state),
                $crate::transition_table!(@target $target),
            );
        )*
        table
    }};

    (@target _) => {
        $crate::core::RawTarget::Terminal
    };
    (@target [ $($entry:literal),* $(,)? ]) => {
        $crate::core::RawTarget::List(::std::vec![
            $($crate::core::RawTarget::Name(::std::string::String::from($entry))),*
        ])
    };
    (@target $name:literal) => {
        $crate::core::RawTarget::Name(::std::string::String::from($name))
    };
}
