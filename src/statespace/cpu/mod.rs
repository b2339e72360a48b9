mod state_space;
