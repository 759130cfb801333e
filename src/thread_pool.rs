use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{Receiver, Sender, unbounded};

struct Job(Box<dyn FnOnce() + Send + 'static>);

struct Worker {
    _id: usize,
    handle: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct JobCounter {
    pending: Mutex<usize>,
    drained: Condvar,
}

impl JobCounter {
    fn submitted(&self) {
        // counted before the send so join() can never observe zero while a
        // job is still in flight
        *self.pending.lock().unwrap() += 1;
    }

    fn finished(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending -= 1;
        if *pending == 0 {
            self.drained.notify_all();
        }
    }

    fn wait_drained(&self) {
        let mut pending = self.pending.lock().unwrap();
        while *pending > 0 {
            pending = self.drained.wait(pending).unwrap();
        }
    }
}

/// Fixed-size worker pool over a crossbeam channel. `join` blocks until
/// every submitted job has run; dropping the pool closes the channel and
/// joins the workers.
pub struct ThreadPool {
    workers: Vec<Worker>,
    counter: Arc<JobCounter>,
    sender: Option<Sender<Job>>,
}

impl ThreadPool {
    pub fn new(size: usize) -> ThreadPool {
        assert!(size > 0);
        let counter = Arc::new(JobCounter::default());
        let (sender, receiver) = unbounded();
        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let counter = Arc::clone(&counter);
            let receiver: Receiver<Job> = receiver.clone();
            let handle = thread::spawn(move || {
                while let Ok(job) = receiver.recv() {
                    log::trace!("worker {id} picked up a job");
                    job.0();
                    counter.finished();
                }
            });
            workers.push(Worker {
                _id: id,
                handle: Some(handle),
            });
        }
        ThreadPool {
            workers,
            counter,
            sender: Some(sender),
        }
    }

    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(sender) = &self.sender {
            self.counter.submitted();
            sender
                .send(Job(Box::new(f)))
                .expect("worker threads hung up");
        }
    }

    pub fn join(&self) {
        self.counter.wait_drained();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.sender = None;
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                handle.join().expect("worker thread panicked");
            }
        }
    }
}
