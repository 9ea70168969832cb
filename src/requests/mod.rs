pub mod episode_req;
