use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// FIFO queue of outbound requests with out-of-band responses keyed by id.
///
/// The page reads requests in order but may answer them in any order; a
/// response for an id that was never queued is refused by the caller, not
/// here.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Resp> {
    requests: VecDeque<(Uuid, Req)>,
    responses: HashMap<Uuid, Resp>,
}

impl<Req, Resp> RequestQueue<Req, Resp> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_request(&mut self, id: Uuid, request: Req) {
        self.requests.push_back((id, request));
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|(req_id, _)| req_id == id)
    }

    /// The next request the page should process, left in place until it is
    /// answered or withdrawn.
    pub fn read_request(&self) -> Option<&(Uuid, Req)> {
        self.requests.front()
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|(req_id, _)| req_id != id);
    }

    pub fn add_response(&mut self, id: Uuid, response: Resp) {
        self.responses.insert(id, response);
    }

    /// Takes the response for `id`, removing it from the queue.
    pub fn take_response(&mut self, id: &Uuid) -> Option<Resp> {
        self.responses.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_read_in_order() {
        let mut queue = RequestQueue::<&str, ()>::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        queue.add_request(first, "a");
        queue.add_request(second, "b");

        assert_eq!(queue.read_request(), Some(&(first, "a")));
        // reading does not pop
        assert_eq!(queue.read_request(), Some(&(first, "a")));

        queue.remove_request(&first);
        assert_eq!(queue.read_request(), Some(&(second, "b")));
        assert!(!queue.has_request(&first));
        assert!(queue.has_request(&second));
    }

    #[test]
    fn responses_are_taken_once() {
        let mut queue = RequestQueue::<(), u32>::new();
        let id = Uuid::new_v4();
        queue.add_response(id, 7);

        assert_eq!(queue.take_response(&id), Some(7));
        assert_eq!(queue.take_response(&id), None);
    }
}
