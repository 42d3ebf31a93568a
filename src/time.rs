use core::fmt::{self, Display};
use num::{CheckedAdd, Integer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes since midnight
pub type Minute = u16;

pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Half-open [start, end) time range
/// <N>: Any integer type
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange<N>(pub N, pub N)
where
    N: Integer + Copy;

impl<N> TimeRange<N>
where
    N: Integer + Copy,
{
    /// Construct a new Time Range
    /// Range is half-open on [start, end)
    /// # Examples
    /// ```
    /// use stundenplan_libs::time::TimeRange;
    ///
    /// let test = TimeRange::new(540, 600);
    ///
    /// assert_eq!(test.0, 540);
    /// assert_eq!(test.1, 600);
    /// ```
    pub fn new(start: N, end: N) -> TimeRange<N> {
        TimeRange(start, end)
    }

    /// Returns the start of the TimeRange
    pub fn start(self) -> N {
        self.0
    }

    /// Returns the (exclusive) end of the TimeRange
    pub fn end(self) -> N {
        self.1
    }

    /// Number of units covered. Inverted ranges have no duration.
    ///
    /// # Examples
    /// ```
    /// use stundenplan_libs::time::TimeRange;
    ///
    /// assert_eq!(TimeRange::new(540, 600).duration(), 60);
    /// assert_eq!(TimeRange::new(600, 540).duration(), 0);
    /// ```
    pub fn duration(self) -> N {
        if self.is_empty() {
            N::zero()
        } else {
            self.1 - self.0
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 >= self.1
    }

    /// `true` if `instant` lies inside [start, end)
    ///
    /// # Examples
    /// ```
    /// use stundenplan_libs::time::TimeRange;
    ///
    /// let class = TimeRange::new(540, 600);
    ///
    /// assert!(class.contains(540));
    /// assert!(class.contains(599));
    /// assert!(!class.contains(600));
    /// ```
    pub fn contains(self, instant: N) -> bool {
        self.0 <= instant && instant < self.1
    }

    /// Ranges that merely abut (`a.end == b.start`) do not overlap
    ///
    /// # Examples
    /// ```
    /// use stundenplan_libs::time::TimeRange;
    ///
    /// let a = TimeRange::new(540, 600);
    ///
    /// assert!(a.overlaps(TimeRange::new(570, 630)));
    /// assert!(!a.overlaps(TimeRange::new(600, 660)));
    /// ```
    pub fn overlaps(self, other: TimeRange<N>) -> bool {
        self.0 < other.1 && other.0 < self.1
    }
}

impl TimeRange<Minute> {
    /// Every whole minute inside the range
    pub fn minutes(self) -> core::ops::Range<Minute> {
        self.0..self.1
    }
}

impl<N> Display for TimeRange<N>
where
    N: Integer + Copy + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.0, self.1)
    }
}

pub trait Sliced<N>
where
    N: Integer + Copy,
{
    fn sliced(self, width: N) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> Sliced<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Integer + CheckedAdd + Copy,
{
    /// Partitions each `TimeRange` into consecutive slices of `width`.
    /// The last slice of a range is *not* clipped to the range end.
    ///
    /// # Example
    /// ```
    /// use stundenplan_libs::time::{Sliced, TimeRange};
    ///
    /// let window = vec![ TimeRange::new(0, 12) ];
    ///
    /// assert_eq!(window.iter().sliced(5),
    ///     vec![
    ///         TimeRange::new(0, 5),
    ///         TimeRange::new(5, 10),
    ///         TimeRange::new(10, 15),
    ///     ]
    /// );
    /// ```
    fn sliced(self, width: N) -> Vec<TimeRange<N>> {
        let mut slices: Vec<TimeRange<N>> = Vec::with_capacity(self.size_hint().1.unwrap_or(0));

        if width <= N::zero() {
            return slices;
        }

        for time in self {
            let mut start = time.start();

            while start < time.end() {
                match start.checked_add(&width) {
                    Some(end) => {
                        slices.push(TimeRange::new(start, end));
                        start = end;
                    }
                    None => break,
                }
            }
        }

        slices
    }
}

pub trait RunMerge<N, K>
where
    N: Integer + Copy,
{
    fn run_merge(self) -> Vec<(TimeRange<N>, K)>;
}

impl<T, N, K> RunMerge<N, K> for T
where
    T: Iterator<Item = (TimeRange<N>, K)>,
    N: Integer + Copy,
    K: PartialEq,
{
    /// Combines contiguous TimeRanges carrying equal keys into maximal runs.
    /// Input is expected in ascending order; a gap or a change of key closes the run.
    ///
    /// # Examples
    /// ```
    /// use stundenplan_libs::time::{RunMerge, TimeRange};
    ///
    /// let samples = vec![
    ///     (TimeRange::new(0, 5), 1),
    ///     (TimeRange::new(5, 10), 1),
    ///     (TimeRange::new(10, 15), 2),
    ///     (TimeRange::new(20, 25), 2),
    /// ];
    ///
    /// assert_eq!(
    ///     samples.into_iter().run_merge(),
    ///     vec![
    ///         (TimeRange::new(0, 10), 1),
    ///         (TimeRange::new(10, 15), 2),
    ///         (TimeRange::new(20, 25), 2),
    ///     ]
    /// );
    /// ```
    fn run_merge(self) -> Vec<(TimeRange<N>, K)> {
        let size_hint = self.size_hint().1.unwrap_or(0);
        let (last, mut acc) = self.fold(
            (None, Vec::with_capacity(size_hint)),
            |(last, mut acc), (curr, key)| match last {
                None => (Some((curr, key)), acc),
                Some((run, run_key)) => {
                    let run: TimeRange<N> = run;
                    if run.end() == curr.start() && run_key == key {
                        (Some((TimeRange::new(run.start(), curr.end()), run_key)), acc)
                    } else {
                        acc.push((run, run_key));
                        (Some((curr, key)), acc)
                    }
                }
            },
        );

        if let Some(run) = last {
            acc.push(run);
        }

        acc
    }
}
