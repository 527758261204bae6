// Score director trait definition.

use planwright_core::PlanningSolution;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Owning the working solution of a run
// - Calculating scores, caching them until something changes
// - Receiving change notifications from moves and problem fact changes
//
// Problem fact changes talk to the director through the same
// notification calls moves use, so every mutation of the working
// solution invalidates the cached score.
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Implementations treat mutable access as a change.
    fn working_solution_mut(&mut self) -> &mut S;

    // Replaces the working solution wholesale.
    fn set_working_solution(&mut self, solution: S);

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Clones the working solution.
    fn clone_working_solution(&self) -> S;

    // Called before a planning variable is changed.
    fn before_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Called after a planning variable is changed.
    fn after_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Called before an entity is added to the working solution.
    fn before_entity_added(&mut self, entity_index: usize) {
        self.before_variable_changed(entity_index, "");
    }

    // Called after an entity is added to the working solution.
    fn after_entity_added(&mut self, entity_index: usize) {
        self.after_variable_changed(entity_index, "");
    }

    // Called before an entity is removed from the working solution.
    fn before_entity_removed(&mut self, entity_index: usize) {
        self.before_variable_changed(entity_index, "");
    }

    // Called after an entity is removed from the working solution.
    fn after_entity_removed(&mut self, entity_index: usize) {
        self.after_variable_changed(entity_index, "");
    }

    // Called before a problem fact is changed.
    fn before_problem_fact_changed(&mut self, fact: &str);

    // Called after a problem fact is changed.
    fn after_problem_fact_changed(&mut self, fact: &str);

    // Triggers derived value updates after a batch of changes.
    fn trigger_variable_listeners(&mut self) {}

    // Returns how many full score calculations this director has performed.
    fn calculation_count(&self) -> u64;

    // Registers a typed undo closure.
    //
    // Called by moves after applying changes. Closures run in reverse
    // order during `undo_changes()` of a recording director.
    //
    // Default implementation does nothing (for non-recording directors).
    fn register_undo(&mut self, _undo: Box<dyn FnOnce(&mut S) + Send>) {}
}
