mod riccati;
