use super::{Connection, NetworkConfig};
use crate::Innovation;

use ahash::RandomState;
use parking_lot::Mutex;

use std::collections::hash_map::{Entry, HashMap};
use std::sync::Arc;

/// A single gene of a network's innovation map: which
/// connection an innovation number stands for, and the
/// weight it carries in that network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InnovationInfo {
    pub innovation: Innovation,
    pub source: usize,
    pub destination: usize,
    pub weight: f32,
    /// Disabled entries are skipped when a network is
    /// built from an innovation map.
    pub enabled: bool,
}

impl InnovationInfo {
    /// Returns an enabled entry.
    pub fn new(innovation: Innovation, source: usize, destination: usize, weight: f32) -> InnovationInfo {
        InnovationInfo {
            innovation,
            source,
            destination,
            weight,
            enabled: true,
        }
    }

    /// Returns `(source, destination)`.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.source, self.destination)
    }
}

impl From<&Connection> for InnovationInfo {
    fn from(connection: &Connection) -> InnovationInfo {
        InnovationInfo::new(
            connection.innovation(),
            connection.source(),
            connection.destination(),
            connection.weight(),
        )
    }
}

/// Anything able to hand out innovation numbers for
/// new connections.
///
/// Implementors must make lookup-or-mint a single atomic step:
/// asking twice for the same endpoints always yields the same
/// number, whichever genome asks first.
pub trait InnovationSource {
    /// Returns the innovation number of a connection from `source`
    /// to `destination`, minting a new one if the pair has never
    /// been seen. The flag is `true` if the number already existed.
    fn innovation_for(&mut self, source: usize, destination: usize) -> (Innovation, bool);
}

/// An `InnovationRegistry` keeps track of connection innovations
/// across all the genomes of an evolutionary run, in order to make
/// sure identical mutations are assigned the same innovation numbers.
///
/// Connections are identified by the indices of their endpoints.
/// Entries are never removed, even once no genome expresses them.
#[derive(Debug, Clone)]
pub struct InnovationRegistry {
    next_innovation: Innovation,
    innovations: HashMap<(usize, usize), Innovation, RandomState>,
    endpoints: Vec<(usize, usize)>,
}

impl InnovationRegistry {
    /// Creates a new registry for networks with the given
    /// number of inputs and outputs.
    ///
    /// Freshly initialized networks number their connections
    /// locally: the connection from input `i` to output `o` has
    /// innovation `o + i ⨯ output_count`. Those numbers are
    /// reserved here for the same endpoints, so newly minted
    /// innovations start at `input_count ⨯ output_count`.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::InnovationRegistry;
    ///
    /// let registry = InnovationRegistry::new(3, 2);
    ///
    /// assert_eq!(registry.next_innovation(), 6);
    /// // Input 1 to output 0 (node 3).
    /// assert_eq!(registry.lookup(1, 3), Some(2));
    /// assert_eq!(registry.endpoints(2), Some((1, 3)));
    /// ```
    pub fn new(input_count: usize, output_count: usize) -> InnovationRegistry {
        let (innovations, endpoints) = (0..input_count)
            // Cartesian product of inputs and outputs...
            .flat_map(|i| (0..output_count).map(move |o| (i, o)))
            // ...in innovation order, with outputs offset by the input count.
            .map(|(i, o)| (((i, o + input_count), o + i * output_count), (i, o + input_count)))
            .unzip();
        InnovationRegistry {
            next_innovation: input_count * output_count,
            innovations,
            endpoints,
        }
    }

    /// Creates a new registry for networks of the given configuration.
    pub fn for_config(config: &NetworkConfig) -> InnovationRegistry {
        Self::new(config.input_count.get(), config.output_count.get())
    }

    /// Returns the innovation number assigned to the
    /// endpoints, if any.
    pub fn lookup(&self, source: usize, destination: usize) -> Option<Innovation> {
        self.innovations.get(&(source, destination)).copied()
    }

    /// Returns the endpoints an innovation number was
    /// first assigned to.
    pub fn endpoints(&self, innovation: Innovation) -> Option<(usize, usize)> {
        self.endpoints.get(innovation).copied()
    }

    /// Returns the number the next new innovation will get,
    /// which is also the number of innovations registered.
    pub fn next_innovation(&self) -> Innovation {
        self.next_innovation
    }

    /// Returns an iterator over the complete record of
    /// innovations, in the format `(innovation, (source, destination))`,
    /// in innovation order.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationRegistry, InnovationSource};
    ///
    /// let mut registry = InnovationRegistry::new(1, 1);
    /// registry.innovation_for(0, 2);
    ///
    /// let history: Vec<_> = registry.history().collect();
    /// assert_eq!(history, vec![(0, (0, 1)), (1, (0, 2))]);
    /// ```
    pub fn history(&self) -> impl Iterator<Item = (Innovation, (usize, usize))> + '_ {
        self.endpoints.iter().copied().enumerate()
    }
}

impl InnovationSource for InnovationRegistry {
    fn innovation_for(&mut self, source: usize, destination: usize) -> (Innovation, bool) {
        match self.innovations.entry((source, destination)) {
            Entry::Occupied(entry) => {
                log::trace!(
                    "reusing innovation {} for {} -> {}",
                    entry.get(),
                    source,
                    destination
                );
                (*entry.get(), true)
            }
            Entry::Vacant(entry) => {
                let innovation = self.next_innovation;
                entry.insert(innovation);
                self.endpoints.push((source, destination));
                self.next_innovation += 1;
                log::trace!(
                    "minted innovation {} for {} -> {}",
                    innovation,
                    source,
                    destination
                );
                (innovation, false)
            }
        }
    }
}

/// A cloneable, thread-safe handle to an [`InnovationRegistry`].
///
/// Each lookup-or-mint runs under one lock, so genomes mutated
/// concurrently from different threads still agree on
/// innovation numbers. Give each worker its own clone.
///
/// # Examples
/// ```
/// use morphneat::genomics::{InnovationRegistry, InnovationSource, SharedInnovationRegistry};
///
/// let shared = SharedInnovationRegistry::new(InnovationRegistry::new(2, 1));
///
/// let first = std::thread::scope(|scope| {
///     let mut handle = shared.clone();
///     scope.spawn(move || handle.innovation_for(0, 3).0).join().unwrap()
/// });
///
/// let mut handle = shared.clone();
/// assert_eq!(handle.innovation_for(0, 3), (first, true));
/// ```
#[derive(Debug, Clone)]
pub struct SharedInnovationRegistry(Arc<Mutex<InnovationRegistry>>);

impl SharedInnovationRegistry {
    pub fn new(registry: InnovationRegistry) -> SharedInnovationRegistry {
        SharedInnovationRegistry(Arc::new(Mutex::new(registry)))
    }

    /// Returns a copy of the registry's current state.
    pub fn snapshot(&self) -> InnovationRegistry {
        self.0.lock().clone()
    }

    /// Runs `f` with exclusive access to the registry.
    pub fn with<T>(&self, f: impl FnOnce(&mut InnovationRegistry) -> T) -> T {
        f(&mut self.0.lock())
    }
}

impl InnovationSource for SharedInnovationRegistry {
    fn innovation_for(&mut self, source: usize, destination: usize) -> (Innovation, bool) {
        self.0.lock().innovation_for(source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_reservations() {
        for input_count in 1..6 {
            for output_count in 1..6 {
                let registry = InnovationRegistry::new(input_count, output_count);
                assert_eq!(registry.next_innovation(), input_count * output_count);
                for i in 0..input_count {
                    for o in 0..output_count {
                        let innovation = o + i * output_count;
                        assert_eq!(registry.lookup(i, input_count + o), Some(innovation));
                        assert_eq!(registry.endpoints(innovation), Some((i, input_count + o)));
                    }
                }
            }
        }
    }

    #[test]
    fn lookup_or_mint() {
        let mut registry = InnovationRegistry::new(2, 1);
        assert_eq!(registry.innovation_for(0, 2), (0, true));
        assert_eq!(registry.innovation_for(0, 3), (2, false));
        assert_eq!(registry.innovation_for(3, 2), (3, false));
        assert_eq!(registry.innovation_for(0, 3), (2, true));
        assert_eq!(registry.next_innovation(), 4);
        assert_eq!(registry.endpoints(3), Some((3, 2)));
        assert_eq!(registry.endpoints(4), None);
        assert_eq!(registry.lookup(2, 3), None);
    }

    #[test]
    fn order_independent() {
        let pairs = [(0, 3), (1, 3), (3, 2), (0, 4), (4, 2)];
        let mut forward = InnovationRegistry::new(2, 1);
        let mut backward = InnovationRegistry::new(2, 1);
        for (s, d) in pairs.iter() {
            forward.innovation_for(*s, *d);
        }
        for (s, d) in pairs.iter().rev() {
            backward.innovation_for(*s, *d);
        }
        // Same pairs, every pair has a distinct number in each.
        for (s, d) in pairs.iter() {
            assert!(forward.lookup(*s, *d).is_some());
            assert!(backward.lookup(*s, *d).is_some());
        }
        assert_eq!(forward.next_innovation(), backward.next_innovation());
        let mut numbers: Vec<_> = pairs.iter().map(|(s, d)| forward.lookup(*s, *d)).collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), pairs.len());
    }

    #[test]
    fn concurrent_minting_agrees() {
        let shared = SharedInnovationRegistry::new(InnovationRegistry::new(3, 2));
        let pairs: Vec<(usize, usize)> = (0..3)
            .flat_map(|s| (5..25).map(move |d| (s, d)))
            .collect();

        let results: Vec<Vec<Innovation>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let mut registry = shared.clone();
                    let pairs = &pairs;
                    scope.spawn(move || {
                        // Each thread walks the pairs from a different offset.
                        let offset = t * 7 % pairs.len();
                        let mut numbers = vec![0; pairs.len()];
                        for k in 0..pairs.len() {
                            let idx = (k + offset) % pairs.len();
                            let (s, d) = pairs[idx];
                            numbers[idx] = registry.innovation_for(s, d).0;
                        }
                        numbers
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for numbers in &results[1..] {
            assert_eq!(numbers, &results[0]);
        }
        let registry = shared.snapshot();
        assert_eq!(registry.next_innovation(), 6 + pairs.len());
        for (idx, (s, d)) in pairs.iter().enumerate() {
            assert_eq!(registry.lookup(*s, *d), Some(results[0][idx]));
        }
    }

    #[test]
    fn shared_with() {
        let shared = SharedInnovationRegistry::new(InnovationRegistry::new(1, 1));
        let minted = shared.with(|registry| registry.innovation_for(0, 2));
        assert_eq!(minted, (1, false));
        assert_eq!(shared.snapshot().lookup(0, 2), Some(1));
    }
}
