
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour, minute, second }
    }

    pub fn as_seconds(&self) -> usize {
        self.hour as usize * 3600 + self.minute as usize * 60 + self.second as usize
    }
}

// the contiguous range [start_index, start_index + count) of segment indices
// covering the requested time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlan {
    pub start_index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRange {
    pub number: usize,
    pub start_index: usize,
    pub count: usize,
}

impl SegmentPlan {
    // the count overshoots by one segment so the integer division never cuts
    // the requested window short at the end
    pub fn for_range(start: Timestamp, end: Timestamp, target_duration: usize) -> Self {
        let start_index = start.as_seconds() / target_duration;
        let count = (end.as_seconds() - start.as_seconds()) / target_duration + 1;

        Self { start_index, count }
    }

    pub fn last_index(&self) -> usize {
        self.start_index + self.count
    }

    // groups are aligned to multiples of group_size, so the first and last
    // group of a plan may be partial
    pub fn groups(&self, group_size: usize) -> Vec<GroupRange> {
        let start_group = self.start_index / group_size;
        let last_group = (self.last_index() - 1) / group_size + 1;

        (start_group..last_group)
            .map(|number| {
                let start = (number * group_size).max(self.start_index);
                let end = ((number + 1) * group_size).min(self.last_index());

                GroupRange {
                    number,
                    start_index: start,
                    count: end - start,
                }
            })
            .collect()
    }
}
