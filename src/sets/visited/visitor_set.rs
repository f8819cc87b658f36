/// The visited-node marker used by the backtracking search.
///
/// The search marks a node when it enters its exploration and unmarks it on
/// every exit path, so at any moment the set contains exactly the nodes on
/// the path currently being extended. Implementors only need to make
/// `get`/`set`/`unset` consistent; they never see concurrent access, since a
/// set belongs to exactly one in-progress search.
pub trait VisitorSet {
    fn get(&self, i: usize) -> bool;
    fn set(&mut self, i: usize);
    fn unset(&mut self, i: usize);
}
